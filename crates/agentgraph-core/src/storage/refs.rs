use git2::{ErrorCode, Oid, Repository};
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::model::{EntityKey, EntityKind};

/// The ref prefix for all entity refs.
pub const ENTITY_REF_PREFIX: &str = "refs/agentgraph/";

/// Build the full ref name for an entity:
/// refs/agentgraph/<collection>/<ab>/<sha256(encoded key)>
///
/// Keys are hashed because DIDs and capability names may contain characters
/// that are not legal in ref names.
pub fn entity_ref_name(key: &EntityKey) -> String {
    let digest = hex::encode(Sha256::digest(key.encode().as_bytes()));
    format!(
        "{ENTITY_REF_PREFIX}{}/{}/{}",
        key.kind().collection(),
        &digest[..2],
        digest
    )
}

/// Look up the commit an entity ref points at, if the entity exists.
pub fn find_entity_ref(repo: &Repository, key: &EntityKey) -> Result<Option<Oid>, CoreError> {
    match repo.find_reference(&entity_ref_name(key)) {
        Ok(reference) => Ok(reference.target()),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List the commit Oids of every stored entity of one kind.
pub fn list_entity_refs(repo: &Repository, kind: EntityKind) -> Result<Vec<Oid>, CoreError> {
    let pattern = format!("{ENTITY_REF_PREFIX}{}/*/*", kind.collection());
    let mut results = Vec::new();
    for reference in repo.references_glob(&pattern)? {
        if let Some(oid) = reference?.target() {
            results.push(oid);
        }
    }
    Ok(results)
}
