use thiserror::Error;

use crate::model::EntityKind;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid entity document: {0}")]
    InvalidEntity(#[from] serde_json::Error),

    #[error("Repository not initialized for agentgraph (run `agentgraph init`)")]
    NotInitialized,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Missing blob in entity tree: {0}")]
    MissingBlob(String),

    #[error("Invalid entity key: {0}")]
    InvalidKey(String),

    #[error("Stored entity under {key} is a {found}, expected {expected}")]
    KindMismatch {
        key: String,
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("Status change {id} already exists and cannot be rewritten")]
    AppendOnly { id: String },
}
