//! Commit objects
//!
//! A commit is a snapshot of the working tree at a point in time: the root
//! tree (embedded by value, plus its id), author, message, timestamp, and
//! the ordered parent ids. A root commit has no parents; every other commit
//! has exactly one (histories never merge).

use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length to which log lines truncate the message
const SUMMARY_LENGTH: usize = 40;

/// Snapshot of the working tree with parent links
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit timestamp (canonical form: Unix milliseconds)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
    author: String,
    message: String,
    /// Root tree of the snapshot, embedded by value
    tree: Tree,
    tree_id: ObjectId,
    /// Parent commit ids (empty for a root commit)
    parents: Vec<ObjectId>,
}

impl Commit {
    pub fn new(
        timestamp: DateTime<Utc>,
        author: String,
        message: String,
        tree: Tree,
        tree_id: ObjectId,
        parents: Vec<ObjectId>,
    ) -> Self {
        Commit {
            timestamp,
            author,
            message,
            tree,
            tree_id,
            parents,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, truncated for one-line display
    pub fn short_message(&self) -> String {
        self.message
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(SUMMARY_LENGTH)
            .collect()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_id(&self) -> &ObjectId {
        &self.tree_id
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }
}

impl Object for Commit {}
