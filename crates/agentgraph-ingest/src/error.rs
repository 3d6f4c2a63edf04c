use std::path::PathBuf;

use agentgraph_core::error::CoreError;
use agentgraph_mapper::MapError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed event on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Failed to apply event on line {line}: {source}")]
    Map { line: usize, source: MapError },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Cursor error: {0}")]
    Cursor(String),

    #[error("Another ingestion is running (lock held on {0})")]
    Busy(PathBuf),
}
