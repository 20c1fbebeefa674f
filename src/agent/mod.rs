//! Agent shell: prompt + tool registry + memory reference.
//!
//! `BudgetAgent` follows the "tools in a loop" pattern:
//! 1. Build the conversation: system prompt, stored history, inbound turns
//! 2. Call the LLM with the tool schemas
//! 3. If the LLM requests tool calls: execute, feed back results, repeat
//! 4. Stop at the first plain text reply (or the iteration bound)
//!
//! The agent performs no retries; a failed completion propagates to the
//! caller and becomes a JSON-RPC internal error.

pub mod registry;

pub use registry::AgentRegistry;

use std::sync::Arc;

use serde_json::json;

use crate::a2a::MessageRole;
use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, Role, ToolCall};
use crate::memory::ConversationStore;
use crate::tools::ToolRegistry;

/// System prompt for the budgeting assistant.
const INSTRUCTIONS: &str = "\
You are a helpful budget assistant that helps users plan and save money.

Your primary function is to analyze monthly budgets. When responding:
- Always ask for income and expenses if not provided
- Parse natural input like \"rent 35k, food 15k\"
- Use the get-budget tool to fetch budget analysis
- Include key details: savings, 50/30/20 breakdown, top suggestion
- Keep responses concise but informative
- If user asks for savings tips, suggest one actionable idea
- End with: \"Want to set a savings goal?\"

Use the get-budget tool to fetch budget data.";

/// A normalized prompt message handed to the agent by the translator.
#[derive(Debug, Clone)]
pub struct AgentMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Outcome of one generation: reply text plus structured tool outputs,
/// in the order the tools were invoked.
#[derive(Debug, Clone, Default)]
pub struct AgentReply {
    pub text: String,
    pub tool_results: Vec<serde_json::Value>,
}

/// The budgeting agent: immutable configuration bound at startup.
pub struct BudgetAgent {
    name: String,
    instructions: String,
    model: String,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    memory: Arc<dyn ConversationStore>,
    max_iterations: usize,
}

impl BudgetAgent {
    /// Create the agent from configuration and injected collaborators.
    pub fn new(
        config: &Config,
        llm: Arc<dyn LlmClient>,
        memory: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            name: "budgetAgent".to_string(),
            instructions: INSTRUCTIONS.to_string(),
            model: config.default_model.clone(),
            llm,
            tools: ToolRegistry::new(),
            memory,
            max_iterations: config.max_iterations,
        }
    }

    /// The agent's registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the tools this agent can invoke, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools
            .list_tools()
            .into_iter()
            .map(|info| info.name)
            .collect()
    }

    /// Run one generation for the given context.
    ///
    /// Stored history for `context_id` is replayed before the inbound turns;
    /// the new turns and the reply are recorded afterwards. Memory failures
    /// degrade to a warning and never fail the generation.
    pub async fn generate(
        &self,
        messages: &[AgentMessage],
        context_id: &str,
    ) -> anyhow::Result<AgentReply> {
        let mut chat = vec![ChatMessage::new(Role::System, self.instructions.clone())];

        match self.memory.history(context_id).await {
            Ok(turns) => {
                for turn in turns {
                    let role = if turn.role == "agent" {
                        Role::Assistant
                    } else {
                        Role::User
                    };
                    chat.push(ChatMessage::new(role, turn.content));
                }
            }
            Err(e) => {
                tracing::warn!("Failed to load conversation history: {}", e);
            }
        }

        for message in messages {
            let role = match message.role {
                MessageRole::User => Role::User,
                MessageRole::Agent => Role::Assistant,
            };
            chat.push(ChatMessage::new(role, message.content.clone()));
        }

        let tool_schemas = self.tools.get_tool_schemas();
        let mut tool_results = Vec::new();

        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent '{}' iteration {}", self.name, iteration + 1);

            let response = self
                .llm
                .chat_completion(&self.model, &chat, Some(&tool_schemas))
                .await?;

            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    chat.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content.clone(),
                        tool_calls: Some(tool_calls.clone()),
                        tool_call_id: None,
                    });

                    for tool_call in tool_calls {
                        let feedback = self.run_tool(tool_call, &mut tool_results).await;
                        chat.push(ChatMessage::tool_result(tool_call.id.clone(), feedback));
                    }

                    continue;
                }
            }

            // No tool calls: this is the final reply. An empty reply is
            // allowed and surfaces as an empty text artifact.
            let text = response.content.unwrap_or_default();
            self.record_exchange(context_id, messages, &text).await;
            return Ok(AgentReply { text, tool_results });
        }

        let text = format!(
            "Max iterations ({}) reached before a final reply",
            self.max_iterations
        );
        self.record_exchange(context_id, messages, &text).await;
        Ok(AgentReply { text, tool_results })
    }

    /// Execute one tool call, collecting its structured result.
    ///
    /// Returns the text fed back to the LLM. Tool failures are reported to
    /// the model rather than aborting the generation, and produce no entry
    /// in the collected results.
    async fn run_tool(
        &self,
        tool_call: &ToolCall,
        tool_results: &mut Vec<serde_json::Value>,
    ) -> String {
        let name = &tool_call.function.name;
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        tracing::debug!("Executing tool '{}' with args {}", name, args);

        match self.tools.execute(name, args.clone()).await {
            Ok(result) => {
                tool_results.push(json!({
                    "toolCallId": tool_call.id,
                    "toolName": name,
                    "args": args,
                    "result": result,
                }));
                result.to_string()
            }
            Err(e) => {
                tracing::warn!("Tool '{}' failed: {}", name, e);
                format!("Error: {}", e)
            }
        }
    }

    /// Record the inbound turns and the reply for this context.
    async fn record_exchange(&self, context_id: &str, messages: &[AgentMessage], reply: &str) {
        for message in messages {
            let role = match message.role {
                MessageRole::User => "user",
                MessageRole::Agent => "agent",
            };
            if let Err(e) = self.memory.append(context_id, role, &message.content).await {
                tracing::warn!("Failed to record conversation turn: {}", e);
                return;
            }
        }
        if let Err(e) = self.memory.append(context_id, "agent", reply).await {
            tracing::warn!("Failed to record agent reply: {}", e);
        }
    }
}
