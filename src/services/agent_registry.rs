use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

/// A configured assistant: the unit tenants create, tune, and point
/// conversations at.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field-level changes for an update. `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct AgentChanges {
    pub name: Option<String>,
    pub model: Option<String>,
    pub instructions: Option<String>,
}

impl AgentChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.model.is_none() && self.instructions.is_none()
    }
}

/// In-process agent storage keyed by id.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: DashMap<Uuid, Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self { agents: DashMap::new() }
    }

    /// All agents, oldest first so listings are stable across calls.
    pub fn list(&self) -> Vec<Agent> {
        let mut agents: Vec<Agent> = self.agents.iter().map(|entry| entry.value().clone()).collect();
        agents.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        agents
    }

    pub fn get(&self, id: Uuid) -> Option<Agent> {
        self.agents.get(&id).map(|entry| entry.value().clone())
    }

    pub fn create(&self, name: String, model: String, instructions: Option<String>) -> Agent {
        let now = Utc::now();
        let agent = Agent {
            id: Uuid::new_v4(),
            name,
            model,
            instructions,
            created_at: now,
            updated_at: now,
        };
        self.agents.insert(agent.id, agent.clone());
        agent
    }

    pub fn update(&self, id: Uuid, changes: AgentChanges) -> Option<Agent> {
        let mut entry = self.agents.get_mut(&id)?;
        let agent = entry.value_mut();
        if let Some(name) = changes.name {
            agent.name = name;
        }
        if let Some(model) = changes.model {
            agent.model = model;
        }
        if let Some(instructions) = changes.instructions {
            agent.instructions = Some(instructions);
        }
        agent.updated_at = Utc::now();
        Some(agent.clone())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.agents.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
