//! Agent registry: resolves the agent id from the request path.
//!
//! Built once at startup from configuration and injected into the HTTP
//! state; there is no process-global agent.

use std::collections::HashMap;
use std::sync::Arc;

use super::BudgetAgent;

/// Immutable map of agent id to agent.
pub struct AgentRegistry {
    agents: HashMap<String, Arc<BudgetAgent>>,
}

impl AgentRegistry {
    /// Create a registry from the given agents, keyed by their names.
    pub fn new(agents: Vec<Arc<BudgetAgent>>) -> Self {
        Self {
            agents: agents
                .into_iter()
                .map(|a| (a.name().to_string(), a))
                .collect(),
        }
    }

    /// Resolve an agent by id.
    pub fn resolve(&self, agent_id: &str) -> Option<Arc<BudgetAgent>> {
        self.agents.get(agent_id).cloned()
    }

    /// Ids of all registered agents.
    pub fn agent_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.agents.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Names of all tools across registered agents, sorted and deduplicated.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .agents
            .values()
            .flat_map(|agent| agent.tool_names())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}
