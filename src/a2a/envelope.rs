//! Envelope translation: inbound JSON-RPC request to normalized prompt
//! messages, and agent reply back to a task envelope.
//!
//! All identifier fallbacks go through `id_or_new` so every "use the supplied
//! id or mint one" decision behaves identically.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::types::{
    Artifact, HistoryMessage, IncomingMessage, MessageRole, Part, RpcParams, TaskEnvelope,
    TaskStatus,
};
use crate::agent::{AgentMessage, AgentReply};

/// Use the supplied identifier, or mint a fresh UUID when it is absent or
/// empty.
pub fn id_or_new(existing: Option<&str>) -> String {
    match existing {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// The correlation id to echo back: the supplied `id`, or null.
pub fn echo_id(body: &Value) -> Value {
    body.get("id").cloned().unwrap_or(Value::Null)
}

/// Check the JSON-RPC envelope: version must be the string "2.0" and the
/// correlation id must be present, non-null, and (if a string) non-empty.
pub fn protocol_valid(body: &Value) -> bool {
    let version_ok = body.get("jsonrpc").and_then(Value::as_str) == Some("2.0");
    let id_ok = match body.get("id") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    };
    version_ok && id_ok
}

/// The effective inbound message list: a singular `message` wins over a
/// `messages` list; neither yields an empty list.
pub fn message_list(params: &RpcParams) -> Vec<IncomingMessage> {
    if let Some(message) = &params.message {
        vec![message.clone()]
    } else {
        params.messages.clone().unwrap_or_default()
    }
}

/// Concatenate a message's parts into one prompt text blob.
///
/// Text parts contribute their literal text; every other kind contributes
/// the serialized JSON of its data payload. Parts are joined by newlines.
pub fn flatten_parts(parts: &[Part]) -> String {
    parts
        .iter()
        .map(|part| match part {
            Part::Text { text } => text.clone(),
            Part::Data { data } => data.to_string(),
            Part::Unknown { data, .. } => data.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize inbound messages into the agent's prompt contract. Role
/// defaults to `user`; missing parts yield an empty string.
pub fn normalize(inbound: &[IncomingMessage]) -> Vec<AgentMessage> {
    inbound
        .iter()
        .map(|msg| AgentMessage {
            role: msg.role.unwrap_or(MessageRole::User),
            content: msg
                .parts
                .as_deref()
                .map(flatten_parts)
                .unwrap_or_default(),
        })
        .collect()
}

/// Assemble the completed task envelope for an agent reply.
///
/// Invariants: the history is every inbound message followed by exactly one
/// synthesized agent message; artifacts are one text artifact plus,
/// only when tool results were reported, one aggregating data artifact.
pub fn build_task(
    agent_id: &str,
    params: &RpcParams,
    inbound: &[IncomingMessage],
    reply: &AgentReply,
    context_id: &str,
) -> TaskEnvelope {
    let reply_part = Part::text(reply.text.clone());

    let mut artifacts = vec![Artifact {
        artifact_id: Uuid::new_v4().to_string(),
        name: format!("{}Response", agent_id),
        parts: vec![reply_part.clone()],
    }];

    if !reply.tool_results.is_empty() {
        artifacts.push(Artifact {
            artifact_id: Uuid::new_v4().to_string(),
            name: "ToolResults".to_string(),
            parts: reply
                .tool_results
                .iter()
                .map(|result| Part::data(result.clone()))
                .collect(),
        });
    }

    // Task id fallbacks resolve per message, independently: a message without
    // ids gets its own fresh task id rather than sharing the envelope's.
    let mut history: Vec<HistoryMessage> = inbound
        .iter()
        .map(|msg| HistoryMessage {
            kind: "message".to_string(),
            role: msg.role.unwrap_or(MessageRole::User),
            parts: msg.parts.clone(),
            message_id: id_or_new(msg.message_id.as_deref()),
            task_id: Some(id_or_new(
                msg.task_id.as_deref().or(params.task_id.as_deref()),
            )),
        })
        .collect();

    history.push(HistoryMessage {
        kind: "message".to_string(),
        role: MessageRole::Agent,
        parts: Some(vec![reply_part.clone()]),
        message_id: Uuid::new_v4().to_string(),
        task_id: Some(id_or_new(params.task_id.as_deref())),
    });

    TaskEnvelope {
        id: id_or_new(params.task_id.as_deref()),
        context_id: context_id.to_string(),
        status: TaskStatus {
            state: "completed".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            message: HistoryMessage {
                kind: "message".to_string(),
                role: MessageRole::Agent,
                parts: Some(vec![reply_part]),
                message_id: Uuid::new_v4().to_string(),
                task_id: None,
            },
        },
        artifacts,
        history,
        kind: "task".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_message(text: &str) -> IncomingMessage {
        IncomingMessage {
            parts: Some(vec![Part::text(text)]),
            ..Default::default()
        }
    }

    fn reply(text: &str) -> AgentReply {
        AgentReply {
            text: text.to_string(),
            tool_results: Vec::new(),
        }
    }

    #[test]
    fn test_id_or_new_prefers_existing() {
        assert_eq!(id_or_new(Some("abc")), "abc");

        // Absent or empty ids mint a fresh, parseable UUID
        assert!(Uuid::parse_str(&id_or_new(None)).is_ok());
        assert!(Uuid::parse_str(&id_or_new(Some(""))).is_ok());
    }

    #[test]
    fn test_protocol_valid_requires_version_and_id() {
        assert!(protocol_valid(&json!({ "jsonrpc": "2.0", "id": 1 })));
        assert!(protocol_valid(&json!({ "jsonrpc": "2.0", "id": "req-1" })));

        assert!(!protocol_valid(&json!({ "jsonrpc": "1.0", "id": 1 })));
        assert!(!protocol_valid(&json!({ "jsonrpc": 2.0, "id": 1 })));
        assert!(!protocol_valid(&json!({ "id": 1 })));
        assert!(!protocol_valid(&json!({ "jsonrpc": "2.0" })));
        assert!(!protocol_valid(&json!({ "jsonrpc": "2.0", "id": null })));
        assert!(!protocol_valid(&json!({ "jsonrpc": "2.0", "id": "" })));
    }

    #[test]
    fn test_echo_id_falls_back_to_null() {
        assert_eq!(echo_id(&json!({ "id": "req-7" })), json!("req-7"));
        assert_eq!(echo_id(&json!({})), Value::Null);
    }

    #[test]
    fn test_singular_message_wins_over_list() {
        let params = RpcParams {
            message: Some(text_message("single")),
            messages: Some(vec![text_message("a"), text_message("b")]),
            ..Default::default()
        };
        let list = message_list(&params);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].parts, Some(vec![Part::text("single")]));

        let params = RpcParams {
            messages: Some(vec![text_message("a"), text_message("b")]),
            ..Default::default()
        };
        assert_eq!(message_list(&params).len(), 2);

        assert!(message_list(&RpcParams::default()).is_empty());
    }

    #[test]
    fn test_flatten_joins_parts_with_newlines() {
        let parts = vec![
            Part::text("rent 35k"),
            Part::data(json!({ "income": 100000 })),
            Part::Unknown {
                kind: "file".to_string(),
                data: json!({ "uri": "a.png" }),
            },
        ];
        assert_eq!(
            flatten_parts(&parts),
            "rent 35k\n{\"income\":100000}\n{\"uri\":\"a.png\"}"
        );

        assert_eq!(flatten_parts(&[]), "");
    }

    #[test]
    fn test_normalize_defaults_role_and_content() {
        let inbound = vec![
            IncomingMessage::default(),
            IncomingMessage {
                role: Some(MessageRole::Agent),
                parts: Some(vec![Part::text("previous reply")]),
                ..Default::default()
            },
        ];
        let normalized = normalize(&inbound);

        assert_eq!(normalized[0].role, MessageRole::User);
        assert_eq!(normalized[0].content, "");
        assert_eq!(normalized[1].role, MessageRole::Agent);
        assert_eq!(normalized[1].content, "previous reply");
    }

    #[test]
    fn test_build_task_shape() {
        let params = RpcParams {
            task_id: Some("task-1".to_string()),
            ..Default::default()
        };
        let inbound = vec![text_message("hi")];
        let task = build_task("budgetAgent", &params, &inbound, &reply("hello"), "ctx-1");

        assert_eq!(task.kind, "task");
        assert_eq!(task.id, "task-1");
        assert_eq!(task.context_id, "ctx-1");
        assert_eq!(task.status.state, "completed");
        assert_eq!(
            task.status.message.parts,
            Some(vec![Part::text("hello")])
        );
        assert!(task.status.message.task_id.is_none());
    }

    #[test]
    fn test_history_ends_with_agent_reply() {
        let inbound = vec![text_message("one"), text_message("two")];
        let task = build_task(
            "budgetAgent",
            &RpcParams::default(),
            &inbound,
            &reply("done"),
            "ctx-1",
        );

        assert_eq!(task.history.len(), inbound.len() + 1);
        let last = task.history.last().unwrap();
        assert_eq!(last.role, MessageRole::Agent);
        assert_eq!(last.parts, Some(vec![Part::text("done")]));
        assert_eq!(last.kind, "message");
    }

    #[test]
    fn test_history_preserves_supplied_ids() {
        let inbound = vec![IncomingMessage {
            message_id: Some("m-1".to_string()),
            task_id: Some("t-override".to_string()),
            parts: Some(vec![Part::text("hi")]),
            ..Default::default()
        }];
        let params = RpcParams {
            task_id: Some("t-envelope".to_string()),
            ..Default::default()
        };
        let task = build_task("budgetAgent", &params, &inbound, &reply("ok"), "ctx-1");

        // The message's own ids win over the envelope fallback
        assert_eq!(task.history[0].message_id, "m-1");
        assert_eq!(task.history[0].task_id.as_deref(), Some("t-override"));

        // The trailing agent message uses the envelope task id
        assert_eq!(task.history[1].task_id.as_deref(), Some("t-envelope"));
    }

    #[test]
    fn test_history_task_ids_fall_back_independently() {
        let inbound = vec![text_message("a"), text_message("b")];
        let task = build_task(
            "budgetAgent",
            &RpcParams::default(),
            &inbound,
            &reply("ok"),
            "ctx-1",
        );

        // With no ids supplied anywhere, each entry mints its own task id
        let t0 = task.history[0].task_id.clone().unwrap();
        let t1 = task.history[1].task_id.clone().unwrap();
        assert_ne!(t0, t1);
        assert_ne!(t0, task.id);
    }

    #[test]
    fn test_text_artifact_always_present() {
        let task = build_task(
            "budgetAgent",
            &RpcParams::default(),
            &[],
            &reply(""),
            "ctx-1",
        );

        assert_eq!(task.artifacts.len(), 1);
        assert_eq!(task.artifacts[0].name, "budgetAgentResponse");
        assert_eq!(task.artifacts[0].parts, vec![Part::text("")]);
    }

    #[test]
    fn test_tool_results_artifact_iff_results_reported() {
        let with_results = AgentReply {
            text: "ok".to_string(),
            tool_results: vec![json!({ "savings": 1 }), json!({ "savings": 2 })],
        };
        let task = build_task(
            "budgetAgent",
            &RpcParams::default(),
            &[],
            &with_results,
            "ctx-1",
        );

        assert_eq!(task.artifacts.len(), 2);
        assert_eq!(task.artifacts[1].name, "ToolResults");
        assert_eq!(
            task.artifacts[1].parts,
            vec![
                Part::data(json!({ "savings": 1 })),
                Part::data(json!({ "savings": 2 })),
            ]
        );

        let task = build_task(
            "budgetAgent",
            &RpcParams::default(),
            &[],
            &reply("ok"),
            "ctx-1",
        );
        assert_eq!(task.artifacts.len(), 1);
    }

    #[test]
    fn test_envelope_ids_minted_when_absent() {
        let task = build_task(
            "budgetAgent",
            &RpcParams::default(),
            &[],
            &reply("ok"),
            "ctx-fixed",
        );

        assert!(Uuid::parse_str(&task.id).is_ok());
        assert_eq!(task.context_id, "ctx-fixed");
    }
}
