//! Object identifier (SHA-256 digest)
//!
//! Object IDs are 64-character lowercase hexadecimal strings representing
//! SHA-256 digests over the canonical encoding of a value. They uniquely
//! identify all objects (blobs, trees, commits).
//!
//! ## Format
//!
//! - Full: 64 hex characters
//! - Short: first 7 characters (used in detached-HEAD reports)

use crate::artifacts::core::{Error, Result};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use serde::{Deserialize, Serialize};

/// Object identifier (SHA-256 digest)
///
/// A validated 64-character lowercase hex string. Serves as the key type of
/// every object store and compares by digest equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase hex digits are folded to lowercase. Fails unless the input
    /// is exactly 64 hex characters.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id: String = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidId(format!(
                "expected {} hex characters, got {}",
                OBJECT_ID_LENGTH,
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidId(id));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Abbreviated form of the object ID (first 7 characters)
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::try_parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn parses_full_length_hex_strings(id in "[0-9a-f]{64}") {
            assert!(ObjectId::try_parse(id).is_ok());
        }

        #[test]
        fn folds_uppercase_hex_to_lowercase(id in "[0-9A-F]{64}") {
            let parsed = ObjectId::try_parse(id.clone()).unwrap();
            assert_eq!(parsed.as_ref(), id.to_ascii_lowercase());
        }

        #[test]
        fn rejects_wrong_length(id in "[0-9a-f]{0,63}") {
            assert!(ObjectId::try_parse(id).is_err());
        }

        #[test]
        fn rejects_non_hex_characters(
            prefix in "[0-9a-f]{30}",
            suffix in "[0-9a-f]{33}"
        ) {
            let id = format!("{}g{}", prefix, suffix);
            assert!(ObjectId::try_parse(id).is_err());
        }
    }

    #[test]
    fn rejects_one_char_too_long_and_too_short() {
        let base = "a".repeat(64);
        assert!(ObjectId::try_parse(base.clone()).is_ok());
        assert!(ObjectId::try_parse(format!("{}a", base)).is_err());
        assert!(ObjectId::try_parse(base[..63].to_string()).is_err());
    }

    #[test]
    fn short_oid_is_first_seven_characters() {
        let id = ObjectId::try_parse(format!("{}{}", "0123456789".repeat(6), "abcd")).unwrap();
        assert_eq!(id.to_short_oid(), "0123456");
    }
}
