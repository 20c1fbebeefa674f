//! Wire types for the A2A JSON-RPC surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC error code for a malformed envelope.
pub const INVALID_REQUEST: i64 = -32600;

/// JSON-RPC error code for an unknown agent id.
pub const AGENT_NOT_FOUND: i64 = -32602;

/// JSON-RPC error code for any other failure.
pub const INTERNAL_ERROR: i64 = -32603;

/// One chunk of message or artifact content, tagged by `kind`.
///
/// Unknown kinds are preserved rather than rejected; when flattened into
/// prompt text they contribute the serialized form of their `data` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Part {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "data")]
    Data { data: Value },
    #[serde(untagged)]
    Unknown {
        kind: String,
        #[serde(default)]
        data: Value,
    },
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Create a data part.
    pub fn data(data: Value) -> Self {
        Part::Data { data }
    }
}

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

/// A message as supplied by the caller. All fields are optional; defaults
/// are resolved during translation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MessageRole>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// A fully-resolved message in a task's history (or in its status).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryMessage {
    pub kind: String,

    pub role: MessageRole,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,

    pub message_id: String,

    /// Present on history entries; absent on the status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// A named, typed chunk of output attached to a completed task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub artifact_id: String,
    pub name: String,
    pub parts: Vec<Part>,
}

/// Terminal status of a task. No partial or streaming states are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: String,
    pub timestamp: String,
    pub message: HistoryMessage,
}

/// The result of one completed request/response exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEnvelope {
    pub id: String,
    pub context_id: String,
    pub status: TaskStatus,
    pub artifacts: Vec<Artifact>,
    pub history: Vec<HistoryMessage>,
    pub kind: String,
}

/// The `params` object of an inbound request. `message` and `messages` are
/// mutually exclusive in effect: the singular form wins when both are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<IncomingMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<IncomingMessage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Malformed envelope: wrong version or missing correlation id.
    pub fn invalid_request() -> Self {
        Self {
            code: INVALID_REQUEST,
            message: "Invalid Request: jsonrpc must be \"2.0\" and id is required".to_string(),
            data: None,
        }
    }

    /// The addressed agent is not registered.
    pub fn agent_not_found(agent_id: &str) -> Self {
        Self {
            code: AGENT_NOT_FOUND,
            message: format!("Agent '{}' not found", agent_id),
            data: None,
        }
    }

    /// Any other failure; internal structure is reduced to a message string.
    pub fn internal(details: &str) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: "Internal error".to_string(),
            data: Some(serde_json::json!({ "details": details })),
        }
    }
}

/// The outbound JSON-RPC envelope: exactly one of `result` or `error`.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskEnvelope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    /// A successful response echoing the correlation id.
    pub fn success(id: Value, result: TaskEnvelope) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// A failed response. The id is whatever the caller chooses to echo
    /// (possibly null).
    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}
