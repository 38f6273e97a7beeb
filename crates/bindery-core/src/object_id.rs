//! 12-byte identifiers with a 24-character hex form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseScalarError;

/// A 12-byte identifier, analogous to a document database object id.
///
/// Parsing accepts exactly 24 hexadecimal characters in any case; display
/// always uses lowercase.
///
/// # Example
///
/// ```
/// use bindery_core::ObjectId;
///
/// let id: ObjectId = "5F8F1C2A9B3E4D0012AB34CD".parse().unwrap();
/// assert_eq!(id.to_string(), "5f8f1c2a9b3e4d0012ab34cd");
/// assert_eq!(id.bytes()[0], 0x5f);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Number of raw bytes.
    pub const LEN: usize = 12;

    /// Creates an identifier from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parses a 24-character hex string.
    pub fn parse(s: &str) -> Result<Self, ParseScalarError> {
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| ParseScalarError::Identifier(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Returns the lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for ObjectId {
    type Err = ParseScalarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_mixed_case() {
        let lower = ObjectId::parse("5f8f1c2a9b3e4d0012ab34cd").unwrap();
        let mixed = ObjectId::parse("5F8f1C2a9B3e4D0012aB34Cd").unwrap();
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(ObjectId::parse("5f8f1c2a9b3e4d0012ab34").is_err());
        assert!(ObjectId::parse("5f8f1c2a9b3e4d0012ab34cd00").is_err());
        assert!(ObjectId::parse("").is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        let err = ObjectId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").unwrap_err();
        assert_eq!(err, ParseScalarError::Identifier("zzzzzzzzzzzzzzzzzzzzzzzz".to_string()));
    }

    #[test]
    fn test_default_is_all_zero() {
        assert_eq!(ObjectId::default().to_hex(), "000000000000000000000000");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = ObjectId::from_bytes([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0102030405060708090a0b0c\"");
        assert_eq!(serde_json::from_str::<ObjectId>(&json).unwrap(), id);
    }

    proptest! {
        #[test]
        fn prop_hex_round_trips(bytes in any::<[u8; 12]>()) {
            let id = ObjectId::from_bytes(bytes);
            prop_assert_eq!(ObjectId::parse(&id.to_hex()).unwrap(), id);
            prop_assert_eq!(ObjectId::parse(&id.to_hex().to_uppercase()).unwrap(), id);
        }
    }
}
