//! Object types of the content-addressed store
//!
//! - `blob`: file-content objects
//! - `tree`: directory snapshots (ordered lines of blobs and subtrees)
//! - `commit`: snapshots with parent links
//! - `object_id`: validated digest identifiers
//! - `object`: the shared identity trait
//! - `encoding`: the canonical byte encoding all identities hash over

pub mod blob;
pub mod commit;
pub mod encoding;
pub mod object;
pub mod object_id;
pub mod tree;

/// Hex length of an object id (SHA-256)
pub const OBJECT_ID_LENGTH: usize = 64;
