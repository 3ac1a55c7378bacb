//! Shared engine plumbing
//!
//! This module hosts the error type used by every engine operation and a
//! crate-local `Result` alias. Command implementations convert these into
//! `anyhow` errors at the CLI boundary.

use std::path::PathBuf;

/// Error kinds raised by engine operations
///
/// Each variant corresponds to one failure class surfaced to the user;
/// the daemon maps any of them to an HTTP 500.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid object id: {0}")]
    InvalidId(String),

    #[error("unknown revision or branch: {0}")]
    UnknownRef(String),

    #[error("branch {0} already exists")]
    BranchExists(String),

    #[error("cannot delete branch {0}: currently checked out")]
    BranchCheckedOut(String),

    #[error("no parent commit {0} step(s) above HEAD")]
    NoParent(usize),

    #[error("io failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("network failure: {0}")]
    Network(String),

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("corrupt repository state: {0}")]
    Corruption(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Attach the offending path to a raw io error
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::Io {
            path: path.into(),
            source,
        })
    }
}
