use git2::{Oid, Repository};

use crate::error::CoreError;
use crate::model::Entity;

use super::objects::ENTITY_BLOB;

/// Read an entity from its commit Oid.
pub fn read_entity(repo: &Repository, commit_oid: Oid) -> Result<Entity, CoreError> {
    let commit = repo.find_commit(commit_oid)?;
    let tree = commit.tree()?;
    let entry = tree
        .get_name(ENTITY_BLOB)
        .ok_or_else(|| CoreError::MissingBlob(ENTITY_BLOB.to_string()))?;
    let blob = repo.find_blob(entry.id())?;
    serde_json::from_slice(blob.content()).map_err(CoreError::InvalidEntity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::storage::objects::create_entity_object;
    use tempfile::TempDir;

    #[test]
    fn test_read_status_change_back() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::init(tmp.path()).unwrap();

        let original = Entity::StatusChange(StatusChange {
            id: StatusChangeId::new("0xA", 0),
            agent: "agent:1".into(),
            previous_status: Some(RuntimeStatus::Active),
            new_status: RuntimeStatus::Sleep,
            timestamp: BlockTimestamp(200),
            reason: "Status changed".into(),
            block_number: 12,
            transaction_hash: "0xA".into(),
        });

        let commit_oid = create_entity_object(&repo, &original, None).unwrap();
        let loaded = read_entity(&repo, commit_oid).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_blob() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::init(tmp.path()).unwrap();

        let tree_oid = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_oid).unwrap();
        let sig = git2::Signature::now("test", "test@test").unwrap();
        let commit_oid = repo.commit(None, &sig, &sig, "empty", &tree, &[]).unwrap();

        let err = read_entity(&repo, commit_oid).unwrap_err();
        assert!(matches!(err, CoreError::MissingBlob(_)));
    }
}
