//! Wire records of the sync protocol
//!
//! Both directions ship the full reachable commit set of one branch, using
//! the same canonical encoding the object digests hash over. Peers of this
//! system understand each other; nothing else does.

use crate::artifacts::core::{Error, Result};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::refs::Branch;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Body of a successful pull (server → client)
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PullResponse {
    pub branch_info: Branch,
    pub commits: Vec<(ObjectId, Commit)>,
}

/// Body of a push (client → server)
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    pub branch: String,
    pub branch_info: Branch,
    /// Tip the client last saw on the peer; carried but not interpreted
    pub latest_remote_branch_position: Option<ObjectId>,
    pub commits: Vec<(ObjectId, Commit)>,
}

/// Serialize a wire record
pub fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::into_writer(record, &mut bytes)
        .map_err(|e| Error::Protocol(format!("unencodable record: {}", e)))?;
    Ok(bytes)
}

/// Decode a wire record received from a peer
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    ciborium::from_reader(bytes).map_err(|e| Error::Protocol(format!("undecodable record: {}", e)))
}
