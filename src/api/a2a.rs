//! The A2A endpoint handler.
//!
//! Translates the JSON-RPC envelope onto an agent invocation and back.
//! Validation is fail-fast: protocol check, then agent resolution, then the
//! exchange itself. Every path, including body-parse failures, returns a
//! well-formed JSON-RPC envelope with a matching HTTP status.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use crate::a2a::{self, RpcError, RpcParams, RpcResponse, TaskEnvelope};
use crate::agent::BudgetAgent;

use super::routes::AppState;

/// Handle `POST /a2a/agent/{agentId}`.
pub async fn handle_agent_request(
    State(state): State<Arc<AppState>>,
    Path(agent_id): Path<String>,
    body: String,
) -> (StatusCode, Json<RpcResponse>) {
    let (status, response) = process(&state, &agent_id, &body).await;
    (status, Json(response))
}

/// Process one exchange. Split from the axum wrapper so the full status and
/// envelope behavior is testable without a running server.
async fn process(state: &AppState, agent_id: &str, raw_body: &str) -> (StatusCode, RpcResponse) {
    // The body is parsed manually so malformed JSON follows the same
    // internal-error path as any other unexpected failure.
    let body: Value = match serde_json::from_str(raw_body) {
        Ok(v) => v,
        Err(e) => return internal_error(format!("Invalid JSON body: {}", e)),
    };

    if !a2a::protocol_valid(&body) {
        return (
            StatusCode::BAD_REQUEST,
            RpcResponse::failure(a2a::echo_id(&body), RpcError::invalid_request()),
        );
    }
    let request_id = a2a::echo_id(&body);

    let Some(agent) = state.agents.resolve(agent_id) else {
        tracing::debug!("Unknown agent '{}' requested", agent_id);
        return (
            StatusCode::NOT_FOUND,
            RpcResponse::failure(request_id, RpcError::agent_not_found(agent_id)),
        );
    };

    match run_exchange(agent_id, agent, &body).await {
        Ok(task) => (StatusCode::OK, RpcResponse::success(request_id, task)),
        // The correlation id is deliberately not echoed on this path.
        Err(e) => internal_error(e.to_string()),
    }
}

/// Steps 3-5 of the exchange: decode params, normalize, delegate, assemble.
async fn run_exchange(
    agent_id: &str,
    agent: Arc<BudgetAgent>,
    body: &Value,
) -> anyhow::Result<TaskEnvelope> {
    let params: RpcParams = match body.get("params") {
        None | Some(Value::Null) => RpcParams::default(),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| anyhow::anyhow!("Invalid params: {}", e))?,
    };

    let inbound = a2a::message_list(&params);
    let prompt = a2a::normalize(&inbound);
    let context_id = a2a::id_or_new(params.context_id.as_deref());

    let reply = agent.generate(&prompt, &context_id).await?;

    Ok(a2a::build_task(
        agent_id, &params, &inbound, &reply, &context_id,
    ))
}

fn internal_error(details: String) -> (StatusCode, RpcResponse) {
    tracing::error!("A2A request failed: {}", details);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        RpcResponse::failure(Value::Null, RpcError::internal(&details)),
    )
}
