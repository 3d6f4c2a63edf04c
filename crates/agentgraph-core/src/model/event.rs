//! Events emitted by the on-chain agent registry, one per log entry.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::agent::Did;
use super::block::EventEnvelope;
use super::bytes::Bytes;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRegistered {
    pub did: Did,
    pub name: String,
    pub description: String,
    pub owner: Bytes,
    pub ipfs_hash: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentUpdated {
    pub did: Did,
    pub name: String,
    pub ipfs_hash: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatusChanged {
    pub did: Did,
    /// Raw on-chain code, decoded with [`super::StatusCode`].
    ///
    /// Any JSON integer is accepted. Values outside `i128` (a full uint256)
    /// saturate, which keeps them unknown.
    #[serde(deserialize_with = "deserialize_status_code")]
    pub new_status: i128,
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<i128, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(StatusCodeVisitor)
}

struct StatusCodeVisitor;

impl Visitor<'_> for StatusCodeVisitor {
    type Value = i128;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer status code")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i128, E> {
        Ok(v.into())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i128, E> {
        Ok(v.into())
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<i128, E> {
        Ok(v)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<i128, E> {
        Ok(i128::try_from(v).unwrap_or(i128::MAX))
    }

    // Integers past u64 reach us as floats
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i128, E> {
        if v.is_finite() && v.fract() == 0.0 {
            Ok(v as i128)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityAdded {
    pub did: Did,
    pub capability_name: String,
    pub capability_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent {
    Registered(AgentRegistered),
    Updated(AgentUpdated),
    StatusChanged(AgentStatusChanged),
    CapabilityAdded(CapabilityAdded),
}

impl AgentEvent {
    pub fn did(&self) -> &Did {
        match self {
            AgentEvent::Registered(e) => &e.did,
            AgentEvent::Updated(e) => &e.did,
            AgentEvent::StatusChanged(e) => &e.did,
            AgentEvent::CapabilityAdded(e) => &e.did,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AgentEvent::Registered(_) => "registered",
            AgentEvent::Updated(_) => "updated",
            AgentEvent::StatusChanged(_) => "status_changed",
            AgentEvent::CapabilityAdded(_) => "capability_added",
        }
    }
}

/// An event together with the block metadata it was logged under.
///
/// Serialized flat: envelope fields sit beside the `event` tag and payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    #[serde(flatten)]
    pub envelope: EventEnvelope,
    #[serde(flatten)]
    pub event: AgentEvent,
}
