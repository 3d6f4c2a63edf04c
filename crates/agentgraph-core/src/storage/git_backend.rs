use std::collections::BTreeMap;
use std::path::Path;

use git2::{Oid, Repository};

use crate::config::MapperConfig;
use crate::error::CoreError;
use crate::model::{Entity, EntityKey, EntityKind};

use super::objects::create_entity_object;
use super::read::read_entity;
use super::refs;
use super::{EntityStore, Lookup, WriteBatch};

/// Entity store backed by a Git repository.
///
/// Every entity version is a commit holding `entity.json`; a ref per entity
/// points at its latest version, so `git log <ref>` is the entity's history.
pub struct GitStore {
    repo: Repository,
}

impl GitStore {
    /// Open the Git repository at the given path.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let repo = Repository::open(path)?;
        Ok(Self { repo })
    }

    /// Discover the Git repository from the current directory.
    pub fn discover() -> Result<Self, CoreError> {
        let repo = Repository::discover(".")?;
        Ok(Self { repo })
    }

    /// Check if agentgraph has been initialized in this repo.
    pub fn is_initialized(&self) -> bool {
        self.repo
            .config()
            .ok()
            .and_then(|c| c.get_bool("agentgraph.enabled").ok())
            .unwrap_or(false)
    }

    /// Initialize agentgraph in this repo with the given settings.
    pub fn init_with(&self, settings: &MapperConfig) -> Result<(), CoreError> {
        let mut config = self.repo.config().map_err(CoreError::Git)?;
        settings.save(&mut config)?;
        config
            .set_i32("agentgraph.version", 1)
            .map_err(CoreError::Git)?;
        Ok(())
    }

    /// Initialize agentgraph in this repo with default settings.
    pub fn init(&self) -> Result<(), CoreError> {
        self.init_with(&MapperConfig::default_init())
    }

    /// Read the [agentgraph] settings of this repo.
    pub fn config(&self) -> Result<MapperConfig, CoreError> {
        let config = self.repo.config().map_err(CoreError::Git)?;
        MapperConfig::load(&config)
    }

    /// Number of stored entities of one kind.
    pub fn count(&self, kind: EntityKind) -> Result<usize, CoreError> {
        Ok(refs::list_entity_refs(&self.repo, kind)?.len())
    }

    /// Get the underlying git2::Repository reference.
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Path of the .git directory (or the repo dir for bare repos).
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }
}

impl EntityStore for GitStore {
    fn load(&self, key: &EntityKey) -> Result<Lookup<Entity>, CoreError> {
        let Some(oid) = refs::find_entity_ref(&self.repo, key)? else {
            return Ok(Lookup::NotFound);
        };
        let entity = read_entity(&self.repo, oid)?;
        if entity.kind() != key.kind() {
            return Err(CoreError::KindMismatch {
                key: key.encode(),
                expected: key.kind(),
                found: entity.kind(),
            });
        }
        Ok(Lookup::Found(entity))
    }

    fn save(&mut self, entity: Entity) -> Result<(), CoreError> {
        let mut batch = WriteBatch::new();
        batch.push(entity);
        self.apply(batch)
    }

    /// Writes all objects first, then moves every ref in one ref transaction.
    /// A failure before the transaction commits leaves no ref changed.
    fn apply(&mut self, batch: WriteBatch) -> Result<(), CoreError> {
        let mut targets: BTreeMap<String, Oid> = BTreeMap::new();

        for entity in batch.entities() {
            let key = entity.key();
            let ref_name = refs::entity_ref_name(&key);
            let previous = match targets.get(&ref_name) {
                Some(oid) => Some(*oid),
                None => refs::find_entity_ref(&self.repo, &key)?,
            };
            if let (Entity::StatusChange(_), Some(oid)) = (entity, previous) {
                // Redelivery of the same record is absorbed, anything else is refused
                if read_entity(&self.repo, oid)? == *entity {
                    tracing::debug!(key = %key, "Status change already stored");
                    continue;
                }
                return Err(CoreError::AppendOnly { id: key.encode() });
            }
            let oid = create_entity_object(&self.repo, entity, previous)?;
            tracing::trace!(key = %key, oid = %oid, "Staged entity version");
            targets.insert(ref_name, oid);
        }

        if targets.is_empty() {
            return Ok(());
        }

        let mut tx = self.repo.transaction()?;
        for (ref_name, oid) in &targets {
            tx.lock_ref(ref_name)?;
            tx.set_target(ref_name, *oid, None, "agentgraph: apply")?;
        }
        tx.commit()?;
        Ok(())
    }
}
