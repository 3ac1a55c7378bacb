//! Tree objects
//!
//! A tree is one directory level: an ordered sequence of lines, each either
//! a blob entry or a subtree entry. Lines embed the referenced object by
//! value alongside its id, so any shipped commit carries its whole snapshot.
//!
//! Entry paths are relative to the workspace root and `/`-separated;
//! subtree paths end with the separator.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One entry of a tree: a file or a nested directory
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TreeLine {
    Blob {
        id: ObjectId,
        blob: Blob,
        path: String,
    },
    Tree {
        id: ObjectId,
        tree: Tree,
        path: String,
    },
}

impl TreeLine {
    pub fn id(&self) -> &ObjectId {
        match self {
            TreeLine::Blob { id, .. } | TreeLine::Tree { id, .. } => id,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeLine::Blob { path, .. } | TreeLine::Tree { path, .. } => path,
        }
    }
}

/// One directory level of a snapshot
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Tree {
    lines: Vec<TreeLine>,
}

impl Tree {
    pub fn lines(&self) -> &[TreeLine] {
        &self.lines
    }

    /// Walk every line of this tree and of all nested subtrees, depth-first
    pub fn visit<'t>(&'t self, visitor: &mut impl FnMut(&'t TreeLine)) {
        for line in &self.lines {
            visitor(line);
            if let TreeLine::Tree { tree, .. } = line {
                tree.visit(visitor);
            }
        }
    }
}

impl Object for Tree {}
