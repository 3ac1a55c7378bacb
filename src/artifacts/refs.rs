//! Reference types: branches, HEAD, remotes
//!
//! A branch is a movable pointer to a commit (its tip) together with the
//! commit it was forked at. HEAD is either attached to a branch name or
//! detached at a commit id; the enum makes any other shape
//! unrepresentable.

use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Name of the branch a fresh repository starts on
pub const DEFAULT_BRANCH: &str = "master";

/// Named, movable pointer to a commit
///
/// Both fields are `None` on a branch that has never seen a commit.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Branch {
    /// Commit the branch was forked at
    pub created: Option<ObjectId>,
    /// Current head of the branch
    pub tip: Option<ObjectId>,
}

/// Current position pointer
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Head {
    /// Following a branch; the effective id is that branch's tip
    Attached { branch: String },
    /// Pinned directly to a commit
    Detached { id: ObjectId },
}

impl Head {
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached { .. })
    }

    /// The branch name when attached
    pub fn branch(&self) -> Option<&str> {
        match self {
            Head::Attached { branch } => Some(branch),
            Head::Detached { .. } => None,
        }
    }
}

impl Default for Head {
    fn default() -> Self {
        Head::Attached {
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

/// Named peer URL
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Remote {
    pub name: String,
    pub url: String,
}
