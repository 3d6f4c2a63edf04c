pub mod git_backend;
pub mod lookup;
pub mod memory;
pub mod objects;
pub mod read;
pub mod refs;

pub use git_backend::GitStore;
pub use lookup::Lookup;
pub use memory::MemoryStore;

use crate::error::CoreError;
use crate::model::{Agent, Capability, CapabilityKey, Did, Entity, EntityKey, EntityKind};

/// Ordered set of entity writes produced by handling one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    entities: Vec<Entity>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: impl Into<Entity>) -> &mut Self {
        self.entities.push(entity.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

impl IntoIterator for WriteBatch {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

/// Persistence seam for the mapper.
///
/// Loads and saves are synchronous. Any error aborts the event being handled
/// and is surfaced to whoever drives the mapper.
pub trait EntityStore {
    fn load(&self, key: &EntityKey) -> Result<Lookup<Entity>, CoreError>;

    fn save(&mut self, entity: Entity) -> Result<(), CoreError>;

    /// Persist every entity of a batch, in order.
    ///
    /// Backends with transactions override this so the batch lands all at once.
    fn apply(&mut self, batch: WriteBatch) -> Result<(), CoreError> {
        for entity in batch {
            self.save(entity)?;
        }
        Ok(())
    }
}

impl<S: EntityStore + ?Sized> EntityStore for &mut S {
    fn load(&self, key: &EntityKey) -> Result<Lookup<Entity>, CoreError> {
        (**self).load(key)
    }

    fn save(&mut self, entity: Entity) -> Result<(), CoreError> {
        (**self).save(entity)
    }

    fn apply(&mut self, batch: WriteBatch) -> Result<(), CoreError> {
        (**self).apply(batch)
    }
}

pub fn load_agent<S: EntityStore + ?Sized>(
    store: &S,
    did: &Did,
) -> Result<Lookup<Agent>, CoreError> {
    let key = EntityKey::Agent(did.clone());
    store.load(&key)?.try_map(|entity| match entity {
        Entity::Agent(agent) => Ok(agent),
        other => Err(kind_mismatch(&key, other.kind())),
    })
}

pub fn load_capability<S: EntityStore + ?Sized>(
    store: &S,
    key: &CapabilityKey,
) -> Result<Lookup<Capability>, CoreError> {
    let key = EntityKey::Capability(key.clone());
    store.load(&key)?.try_map(|entity| match entity {
        Entity::Capability(capability) => Ok(capability),
        other => Err(kind_mismatch(&key, other.kind())),
    })
}

fn kind_mismatch(key: &EntityKey, found: EntityKind) -> CoreError {
    CoreError::KindMismatch {
        key: key.encode(),
        expected: key.kind(),
        found,
    }
}
