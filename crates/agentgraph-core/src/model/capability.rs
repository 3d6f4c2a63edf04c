use serde::{Deserialize, Serialize};

use super::agent::Did;
use super::block::BlockTimestamp;
use super::key::{join_components, split_components};
use crate::error::CoreError;

/// One capability slot per name per agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapabilityKey {
    pub did: Did,
    pub name: String,
}

impl CapabilityKey {
    pub fn new(did: impl Into<Did>, name: impl Into<String>) -> Self {
        Self {
            did: did.into(),
            name: name.into(),
        }
    }

    pub fn encode(&self) -> String {
        join_components(&[self.did.as_str(), &self.name])
    }

    pub fn parse(encoded: &str) -> Result<Self, CoreError> {
        let mut parts = split_components(encoded)?;
        if parts.len() != 2 {
            return Err(CoreError::InvalidKey(format!(
                "capability key needs 2 components, got {} in {encoded:?}",
                parts.len()
            )));
        }
        let name = parts.pop().unwrap_or_default();
        let did = parts.pop().unwrap_or_default();
        Ok(Self::new(did, name))
    }
}

impl std::fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl TryFrom<String> for CapabilityKey {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CapabilityKey> for String {
    fn from(key: CapabilityKey) -> Self {
        key.encode()
    }
}

/// A named capability of an agent.
///
/// `version` counts every write ever applied to the slot: 1 on creation,
/// +1 on each later write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capability {
    pub id: CapabilityKey,
    pub agent: Did,
    pub name: String,
    pub value: String,
    pub version: u64,
    pub created_at: BlockTimestamp,
    pub updated_at: BlockTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_key_plain() {
        let key = CapabilityKey::new("agent:1", "vision");
        assert_eq!(key.encode(), "agent:1-vision");
        assert_eq!(CapabilityKey::parse("agent:1-vision").unwrap(), key);
    }

    #[test]
    fn test_capability_key_no_collision() {
        let a = CapabilityKey::new("did-x", "y");
        let b = CapabilityKey::new("did", "x-y");
        assert_ne!(a.encode(), b.encode());
        assert_eq!(CapabilityKey::parse(&a.encode()).unwrap(), a);
        assert_eq!(CapabilityKey::parse(&b.encode()).unwrap(), b);
    }

    #[test]
    fn test_capability_key_wrong_arity() {
        assert!(CapabilityKey::parse("lonely").is_err());
        assert!(CapabilityKey::parse("a-b-c").is_err());
    }
}
