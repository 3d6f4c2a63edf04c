//! Composite entity keys.
//!
//! Keys made of several components are encoded by escaping each component
//! (`\` becomes `\\`, `-` becomes `\-`) and joining them with `-`. Components
//! containing neither character encode exactly as plain `a-b` concatenation,
//! and no two distinct component lists share an encoding.

use serde::{Deserialize, Serialize};

use super::agent::Did;
use super::capability::CapabilityKey;
use super::status::StatusChangeId;
use crate::error::CoreError;

const DELIMITER: char = '-';
const ESCAPE: char = '\\';

pub(crate) fn join_components(parts: &[&str]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        for c in part.chars() {
            if c == DELIMITER || c == ESCAPE {
                out.push(ESCAPE);
            }
            out.push(c);
        }
    }
    out
}

pub(crate) fn split_components(encoded: &str) -> Result<Vec<String>, CoreError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = encoded.chars();
    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(next @ (DELIMITER | ESCAPE)) => current.push(next),
                Some(other) => {
                    return Err(CoreError::InvalidKey(format!(
                        "invalid escape '\\{other}' in {encoded:?}"
                    )))
                }
                None => {
                    return Err(CoreError::InvalidKey(format!(
                        "dangling escape at end of {encoded:?}"
                    )))
                }
            },
            DELIMITER => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);
    Ok(parts)
}

/// The three entity types a store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Agent,
    StatusChange,
    Capability,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Agent,
        EntityKind::StatusChange,
        EntityKind::Capability,
    ];

    /// Path segment used when a backend lays entities out by kind.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Agent => "agents",
            EntityKind::StatusChange => "status-changes",
            EntityKind::Capability => "capabilities",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Agent => "agent",
            EntityKind::StatusChange => "status_change",
            EntityKind::Capability => "capability",
        };
        f.write_str(name)
    }
}

/// Typed identity of one stored entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Agent(Did),
    StatusChange(StatusChangeId),
    Capability(CapabilityKey),
}

impl EntityKey {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityKey::Agent(_) => EntityKind::Agent,
            EntityKey::StatusChange(_) => EntityKind::StatusChange,
            EntityKey::Capability(_) => EntityKind::Capability,
        }
    }

    /// Stable string form, unique within a kind.
    pub fn encode(&self) -> String {
        match self {
            EntityKey::Agent(did) => did.as_str().to_string(),
            EntityKey::StatusChange(id) => id.encode(),
            EntityKey::Capability(key) => key.encode(),
        }
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind(), self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_plain_components_join_with_dash() {
        assert_eq!(join_components(&["agent:1", "vision"]), "agent:1-vision");
        assert_eq!(join_components(&["0xA", "0"]), "0xA-0");
    }

    #[test]
    fn test_delimiter_inside_component_is_escaped() {
        let a = join_components(&["a-b", "c"]);
        let b = join_components(&["a", "b-c"]);
        assert_eq!(a, "a\\-b-c");
        assert_eq!(b, "a-b\\-c");
        assert_ne!(a, b);
    }

    #[test]
    fn test_split_rejects_bad_escapes() {
        assert!(split_components("abc\\").is_err());
        assert!(split_components("a\\xb").is_err());
    }

    #[test]
    fn test_entity_key_display() {
        let key = EntityKey::Agent(Did::from("agent:1"));
        assert_eq!(key.kind(), EntityKind::Agent);
        assert_eq!(format!("{key}"), "agent/agent:1");
    }

    proptest! {
        #[test]
        fn prop_split_inverts_join(parts in prop::collection::vec("[a-z:\\-\\\\]{0,8}", 1..4)) {
            let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
            let encoded = join_components(&refs);
            prop_assert_eq!(split_components(&encoded).unwrap(), parts);
        }
    }
}
