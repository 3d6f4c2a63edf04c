pub mod agent;
pub mod block;
pub mod bytes;
pub mod capability;
pub mod event;
pub mod key;
pub mod status;

pub use agent::{Agent, Did};
pub use block::{BlockTimestamp, EventEnvelope, LogPosition};
pub use bytes::Bytes;
pub use capability::{Capability, CapabilityKey};
pub use event::{
    AgentEvent, AgentRegistered, AgentStatusChanged, AgentUpdated, CapabilityAdded, LoggedEvent,
};
pub use key::{EntityKey, EntityKind};
pub use status::{RuntimeStatus, StatusChange, StatusChangeId, StatusCode};

use serde::{Deserialize, Serialize};

/// Any entity the mapper can hand to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Agent(Agent),
    StatusChange(StatusChange),
    Capability(Capability),
}

impl Entity {
    pub fn key(&self) -> EntityKey {
        match self {
            Entity::Agent(a) => EntityKey::Agent(a.did.clone()),
            Entity::StatusChange(s) => EntityKey::StatusChange(s.id.clone()),
            Entity::Capability(c) => EntityKey::Capability(c.id.clone()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Agent(_) => EntityKind::Agent,
            Entity::StatusChange(_) => EntityKind::StatusChange,
            Entity::Capability(_) => EntityKind::Capability,
        }
    }
}

impl From<Agent> for Entity {
    fn from(agent: Agent) -> Self {
        Entity::Agent(agent)
    }
}

impl From<StatusChange> for Entity {
    fn from(change: StatusChange) -> Self {
        Entity::StatusChange(change)
    }
}

impl From<Capability> for Entity {
    fn from(capability: Capability) -> Self {
        Entity::Capability(capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_document_is_tagged_by_kind() {
        let capability = Capability {
            id: CapabilityKey::new("agent:1", "vision"),
            agent: Did::from("agent:1"),
            name: "vision".into(),
            value: "v1".into(),
            version: 1,
            created_at: BlockTimestamp(300),
            updated_at: BlockTimestamp(300),
        };
        let entity = Entity::from(capability.clone());
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["kind"], "capability");
        assert_eq!(json["id"], "agent:1-vision");

        let parsed: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, Entity::Capability(capability));
        assert_eq!(parsed.kind(), EntityKind::Capability);
    }
}
