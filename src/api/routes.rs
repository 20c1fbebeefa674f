//! HTTP route handlers and server bootstrap.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::agent::{AgentRegistry, BudgetAgent};
use crate::config::Config;
use crate::llm::{LlmClient, OpenRouterClient};
use crate::memory::{ConversationStore, SqliteStore};

use super::a2a;
use super::types::*;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Agent registry resolved against the request path
    pub agents: AgentRegistry,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let llm: Arc<dyn LlmClient> = Arc::new(OpenRouterClient::new(config.api_key.clone()));

    let memory: Arc<dyn ConversationStore> = match &config.memory_db_path {
        Some(path) => {
            tracing::info!("Conversation memory at {}", path.display());
            Arc::new(SqliteStore::open(path)?)
        }
        None => {
            tracing::info!("Conversation memory is in-memory (not persisted)");
            Arc::new(SqliteStore::in_memory()?)
        }
    };

    let agent = Arc::new(BudgetAgent::new(&config, llm, memory));
    let agents = AgentRegistry::new(vec![agent]);

    let state = Arc::new(AppState {
        config: config.clone(),
        agents,
    });

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/a2a/agent/:agent_id", post(a2a::handle_agent_request))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config.default_model.clone(),
        agents: state.agents.agent_ids(),
        tools: state.agents.tool_names(),
    })
}
