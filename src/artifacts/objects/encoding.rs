//! Canonical byte encoding and content hashing
//!
//! Every hashed value, the persisted repository state, and the sync wire
//! records go through this one encoding: CBOR with struct fields in
//! declaration order and maps backed by `BTreeMap`. The bytes are therefore
//! stable across processes and platforms, which is what makes the digests
//! meaningful as identities.

use crate::artifacts::core::{Error, Result};
use crate::artifacts::objects::object_id::ObjectId;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

/// Serialize a value into its canonical byte form
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes)
        .map_err(|e| Error::Corruption(format!("canonical encoding failed: {}", e)))?;
    Ok(bytes)
}

/// Decode a value from its canonical byte form
///
/// Used for the persisted state file; a failure here means the file was
/// damaged or written by something else.
pub fn from_canonical_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    ciborium::from_reader(bytes).map_err(|e| Error::Corruption(format!("undecodable state: {}", e)))
}

/// Compute the identifier of a value: SHA-256 over its canonical bytes
pub fn hash_value<T: Serialize>(value: &T) -> Result<ObjectId> {
    let bytes = to_canonical_bytes(value)?;
    let digest = Sha256::digest(&bytes);
    ObjectId::try_parse(hex::encode(digest))
}
