use std::collections::{BTreeMap, HashMap};

use crate::error::CoreError;
use crate::model::{
    Agent, Capability, CapabilityKey, Did, Entity, EntityKey, StatusChange, StatusChangeId,
};

use super::{EntityStore, Lookup, WriteBatch};

/// In-process store. Status changes are kept in append order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    agents: BTreeMap<Did, Agent>,
    capabilities: BTreeMap<CapabilityKey, Capability>,
    status_changes: Vec<StatusChange>,
    status_index: HashMap<StatusChangeId, usize>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entity writes that have landed.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn agent(&self, did: &Did) -> Option<&Agent> {
        self.agents.get(did)
    }

    pub fn capability(&self, key: &CapabilityKey) -> Option<&Capability> {
        self.capabilities.get(key)
    }

    pub fn status_change(&self, id: &StatusChangeId) -> Option<&StatusChange> {
        self.status_index.get(id).map(|&i| &self.status_changes[i])
    }

    /// Audit log of one agent, oldest first.
    pub fn status_changes_for(&self, did: &Did) -> Vec<&StatusChange> {
        self.status_changes
            .iter()
            .filter(|s| &s.agent == did)
            .collect()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn capability_count(&self) -> usize {
        self.capabilities.len()
    }

    pub fn status_change_count(&self) -> usize {
        self.status_changes.len()
    }

    /// `Ok(false)` for an exact redelivery of a stored record, which is not
    /// written again. A different record under a stored id is refused.
    fn admit(&self, change: &StatusChange) -> Result<bool, CoreError> {
        match self.status_change(&change.id) {
            None => Ok(true),
            Some(existing) if existing == change => Ok(false),
            Some(_) => Err(CoreError::AppendOnly {
                id: change.id.encode(),
            }),
        }
    }

    fn insert(&mut self, entity: Entity) {
        match entity {
            Entity::Agent(agent) => {
                self.agents.insert(agent.did.clone(), agent);
            }
            Entity::Capability(capability) => {
                self.capabilities.insert(capability.id.clone(), capability);
            }
            Entity::StatusChange(change) => {
                self.status_index
                    .insert(change.id.clone(), self.status_changes.len());
                self.status_changes.push(change);
            }
        }
        self.writes += 1;
    }
}

impl EntityStore for MemoryStore {
    fn load(&self, key: &EntityKey) -> Result<Lookup<Entity>, CoreError> {
        let found = match key {
            EntityKey::Agent(did) => self.agents.get(did).cloned().map(Entity::Agent),
            EntityKey::Capability(key) => self
                .capabilities
                .get(key)
                .cloned()
                .map(Entity::Capability),
            EntityKey::StatusChange(id) => {
                self.status_change(id).cloned().map(Entity::StatusChange)
            }
        };
        Ok(found.into())
    }

    fn save(&mut self, entity: Entity) -> Result<(), CoreError> {
        if let Entity::StatusChange(change) = &entity {
            if !self.admit(change)? {
                return Ok(());
            }
        }
        self.insert(entity);
        Ok(())
    }

    /// Validates the whole batch first so a rejected batch leaves no trace.
    fn apply(&mut self, batch: WriteBatch) -> Result<(), CoreError> {
        let mut pending: HashMap<&StatusChangeId, &StatusChange> = HashMap::new();
        let mut keep = Vec::with_capacity(batch.len());
        for entity in batch.entities() {
            let write = match entity {
                Entity::StatusChange(change) => match pending.get(&change.id) {
                    Some(&earlier) if earlier == change => false,
                    Some(_) => {
                        return Err(CoreError::AppendOnly {
                            id: change.id.encode(),
                        });
                    }
                    None => {
                        pending.insert(&change.id, change);
                        self.admit(change)?
                    }
                },
                _ => true,
            };
            keep.push(write);
        }
        for (entity, write) in batch.into_iter().zip(keep) {
            if write {
                self.insert(entity);
            }
        }
        Ok(())
    }
}
