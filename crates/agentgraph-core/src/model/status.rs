use serde::{Deserialize, Serialize};

use super::agent::Did;
use super::block::BlockTimestamp;
use super::key::{join_components, split_components};
use crate::error::CoreError;

/// Reason recorded on the founding status change of an agent.
pub const REASON_REGISTERED: &str = "Agent registered";
/// Reason recorded on every status change driven by a status event.
pub const REASON_STATUS_CHANGED: &str = "Status changed";

/// Runtime status of an agent. Any transition between any pair is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeStatus {
    Active,
    Sleep,
    Terminated,
}

impl std::fmt::Display for RuntimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RuntimeStatus::Active => "ACTIVE",
            RuntimeStatus::Sleep => "SLEEP",
            RuntimeStatus::Terminated => "TERMINATED",
        };
        f.write_str(s)
    }
}

/// A status code as it appears on chain, before the fallback is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Known(RuntimeStatus),
    Unknown(i128),
}

impl StatusCode {
    pub fn decode(code: i128) -> Self {
        match code {
            0 => StatusCode::Known(RuntimeStatus::Active),
            1 => StatusCode::Known(RuntimeStatus::Sleep),
            2 => StatusCode::Known(RuntimeStatus::Terminated),
            other => StatusCode::Unknown(other),
        }
    }

    /// Collapse to a status. Unknown codes become `Active` with a warning.
    pub fn resolve(self) -> RuntimeStatus {
        match self {
            StatusCode::Known(status) => status,
            StatusCode::Unknown(code) => {
                tracing::warn!(code, "Unknown runtime status code, treating as ACTIVE");
                RuntimeStatus::Active
            }
        }
    }
}

/// Identity of a status change: the emitting transaction and log index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatusChangeId {
    pub transaction_hash: String,
    pub log_index: u64,
}

impl StatusChangeId {
    pub fn new(transaction_hash: impl Into<String>, log_index: u64) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
            log_index,
        }
    }

    pub fn encode(&self) -> String {
        join_components(&[&self.transaction_hash, &self.log_index.to_string()])
    }

    pub fn parse(encoded: &str) -> Result<Self, CoreError> {
        let parts = split_components(encoded)?;
        match parts.as_slice() {
            [hash, index] => {
                let log_index = index.parse::<u64>().map_err(|e| {
                    CoreError::InvalidKey(format!("bad log index in {encoded:?}: {e}"))
                })?;
                Ok(Self::new(hash.clone(), log_index))
            }
            _ => Err(CoreError::InvalidKey(format!(
                "status change id needs 2 components, got {} in {encoded:?}",
                parts.len()
            ))),
        }
    }
}

impl std::fmt::Display for StatusChangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl TryFrom<String> for StatusChangeId {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StatusChangeId> for String {
    fn from(id: StatusChangeId) -> Self {
        id.encode()
    }
}

/// One immutable entry in an agent's status audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub id: StatusChangeId,
    pub agent: Did,
    /// `None` only for the record written at registration.
    pub previous_status: Option<RuntimeStatus>,
    pub new_status: RuntimeStatus,
    pub timestamp: BlockTimestamp,
    pub reason: String,
    pub block_number: u64,
    pub transaction_hash: String,
}
