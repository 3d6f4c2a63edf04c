use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Raw bytes carried by an event (addresses, content hashes).
///
/// Serialized as `0x`-prefixed lowercase hex. Contents are never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Parse hex with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        hex::decode(digits).map(Self)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Bytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Bytes::from_hex(&s).map_err(|e| de::Error::custom(format!("invalid hex bytes {s:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_prefix_optional() {
        assert_eq!(Bytes::from_hex("0xdead").unwrap(), Bytes(vec![0xde, 0xad]));
        assert_eq!(Bytes::from_hex("DEAD").unwrap(), Bytes(vec![0xde, 0xad]));
        assert_eq!(Bytes::from_hex("0x").unwrap(), Bytes::default());
    }

    #[test]
    fn test_rejects_odd_length() {
        assert!(Bytes::from_hex("0xabc").is_err());
        assert!(serde_json::from_str::<Bytes>("\"0xzz\"").is_err());
    }

    #[test]
    fn test_serializes_lowercase_with_prefix() {
        let json = serde_json::to_string(&Bytes(vec![0xAB, 0x01])).unwrap();
        assert_eq!(json, "\"0xab01\"");
    }
}
