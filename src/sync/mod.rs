//! Peer synchronization
//!
//! - `protocol`: the wire records and their canonical encoding
//! - `client`: HTTP client used by pull/push/clone
//! - `daemon`: the serving side

pub mod client;
pub mod daemon;
pub mod protocol;
