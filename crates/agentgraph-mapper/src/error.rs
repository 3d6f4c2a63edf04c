use agentgraph_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Store error: {0}")]
    Store(#[from] CoreError),
}
