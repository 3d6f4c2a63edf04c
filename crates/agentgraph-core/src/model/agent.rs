use serde::{Deserialize, Serialize};

use super::block::BlockTimestamp;
use super::bytes::Bytes;
use super::status::RuntimeStatus;

/// Decentralized identifier of an agent. Primary key of [`Agent`], never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Did(pub String);

impl Did {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Did {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Did {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A registered agent as last seen in the event log.
///
/// `owner_address` and `created_at` are fixed when the agent is registered.
/// `last_active_at` only moves on registration and on transitions into
/// [`RuntimeStatus::Active`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub did: Did,
    pub name: String,
    pub description: String,
    pub owner_address: Bytes,
    pub ipfs_metadata_hash: Bytes,
    pub runtime_status: RuntimeStatus,
    pub created_at: BlockTimestamp,
    pub updated_at: BlockTimestamp,
    pub last_active_at: BlockTimestamp,
}
