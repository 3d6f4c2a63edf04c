use git2::{Oid, Repository, Signature};

use crate::error::CoreError;
use crate::model::Entity;

/// Name of the single blob in every entity tree.
pub const ENTITY_BLOB: &str = "entity.json";

/// Write an entity as a commit and return the commit Oid.
///
/// Object layout:
///   commit (message = "agentgraph: <kind>/<key>", parent = previous version if any)
///     -> tree
///        -> blob "entity.json"
pub fn create_entity_object(
    repo: &Repository,
    entity: &Entity,
    previous: Option<Oid>,
) -> Result<Oid, CoreError> {
    let bytes = serde_json::to_vec_pretty(entity)?;
    let blob_oid = repo.blob(&bytes)?;

    let mut builder = repo.treebuilder(None)?;
    builder.insert(ENTITY_BLOB, blob_oid, 0o100644)?;
    let tree_oid = builder.write()?;
    let tree = repo.find_tree(tree_oid)?;

    let parent = previous.map(|oid| repo.find_commit(oid)).transpose()?;
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let sig = Signature::now("agentgraph", "agentgraph@local")?;
    let message = format!("agentgraph: {}", entity.key());
    let commit_oid = repo.commit(None, &sig, &sig, &message, &tree, &parents)?;

    Ok(commit_oid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use tempfile::TempDir;

    fn capability(version: u64) -> Entity {
        Entity::Capability(Capability {
            id: CapabilityKey::new("agent:1", "vision"),
            agent: "agent:1".into(),
            name: "vision".into(),
            value: format!("v{version}"),
            version,
            created_at: BlockTimestamp(300),
            updated_at: BlockTimestamp(300 + version),
        })
    }

    #[test]
    fn test_create_entity_object() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::init(tmp.path()).unwrap();

        let commit_oid = create_entity_object(&repo, &capability(1), None).unwrap();

        let commit = repo.find_commit(commit_oid).unwrap();
        assert_eq!(
            commit.message().unwrap(),
            "agentgraph: capability/agent:1-vision"
        );
        assert_eq!(commit.parent_count(), 0);
        let tree = commit.tree().unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.get_name(ENTITY_BLOB).is_some());
    }

    #[test]
    fn test_new_version_chains_to_previous() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::init(tmp.path()).unwrap();

        let first = create_entity_object(&repo, &capability(1), None).unwrap();
        let second = create_entity_object(&repo, &capability(2), Some(first)).unwrap();

        let commit = repo.find_commit(second).unwrap();
        assert_eq!(commit.parent_id(0).unwrap(), first);
    }
}
