//! Repository state and persistence
//!
//! `Storage` is the whole persisted record: the three object stores, the
//! branch table, HEAD, and the remotes list. It is loaded from the `.git`
//! file on command entry, mutated in memory, and written back wholesale on
//! command exit. All objects are immutable once inserted; insertion is
//! idempotent and removal happens only through garbage collection.

use crate::artifacts::core::{Error, IoResultExt, Result};
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::encoding;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeLine};
use crate::artifacts::refs::{Branch, Head, Remote, DEFAULT_BRANCH};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Name of the persistence file at the workspace root
pub const STORAGE_FILE: &str = ".git";

/// Counts of entries removed by a garbage collection pass
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct GcStats {
    pub commits: usize,
    pub trees: usize,
    pub blobs: usize,
}

/// The complete repository state
///
/// Object maps are `BTreeMap` so the canonical encoding of the whole record
/// is deterministic and survives a byte-exact round trip.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    blobs: BTreeMap<ObjectId, Blob>,
    trees: BTreeMap<ObjectId, Tree>,
    commits: BTreeMap<ObjectId, Commit>,
    branches: BTreeMap<String, Branch>,
    head: Head,
    remotes: Vec<Remote>,
}

impl Storage {
    /// Fresh state: one empty `master` branch, HEAD attached to it
    pub fn new() -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(DEFAULT_BRANCH.to_string(), Branch::new(None, None));

        Storage {
            blobs: BTreeMap::new(),
            trees: BTreeMap::new(),
            commits: BTreeMap::new(),
            branches,
            head: Head::default(),
            remotes: Vec::new(),
        }
    }

    pub fn blobs(&self) -> &BTreeMap<ObjectId, Blob> {
        &self.blobs
    }

    pub fn trees(&self) -> &BTreeMap<ObjectId, Tree> {
        &self.trees
    }

    pub fn commits(&self) -> &BTreeMap<ObjectId, Commit> {
        &self.commits
    }

    pub fn branches(&self) -> &BTreeMap<String, Branch> {
        &self.branches
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn set_head(&mut self, head: Head) {
        self.head = head;
    }

    pub fn remotes(&self) -> &[Remote] {
        &self.remotes
    }

    /// HEAD's effective commit id: the branch tip when attached, the pinned
    /// id when detached
    pub fn resolve_head(&self) -> Option<ObjectId> {
        match &self.head {
            Head::Attached { branch } => self.branches.get(branch).and_then(|b| b.tip.clone()),
            Head::Detached { id } => Some(id.clone()),
        }
    }

    /// Insert a blob unless its id is already mapped
    pub fn insert_blob(&mut self, id: ObjectId, blob: Blob) {
        self.blobs.entry(id).or_insert(blob);
    }

    /// Insert a tree unless its id is already mapped
    pub fn insert_tree(&mut self, id: ObjectId, tree: Tree) {
        self.trees.entry(id).or_insert(tree);
    }

    /// Insert a commit unless its id is already mapped
    pub fn insert_commit(&mut self, id: ObjectId, commit: Commit) {
        self.commits.entry(id).or_insert(commit);
    }

    pub fn insert_branch(&mut self, name: &str, branch: Branch) {
        self.branches.insert(name.to_string(), branch);
    }

    pub fn remove_branch(&mut self, name: &str) -> Option<Branch> {
        self.branches.remove(name)
    }

    pub fn set_branch_tip(&mut self, name: &str, tip: Option<ObjectId>) {
        if let Some(branch) = self.branches.get_mut(name) {
            branch.tip = tip;
        }
    }

    pub fn add_remote(&mut self, remote: Remote) {
        self.remotes.push(remote);
    }

    pub fn remove_remote(&mut self, name: &str) -> bool {
        let before = self.remotes.len();
        self.remotes.retain(|r| r.name != name);
        self.remotes.len() != before
    }

    pub fn find_remote(&self, name: &str) -> Option<&Remote> {
        self.remotes.iter().find(|r| r.name == name)
    }

    /// All commits reachable from `from`, in traversal order
    pub fn reachable(&self, from: ObjectId) -> Vec<(ObjectId, &Commit)> {
        RevList::new(&self.commits, from).collect()
    }

    /// Import a shipped commit set and point `branch_name` at `branch_info`
    ///
    /// Every commit's embedded tree graph (root tree, subtrees, blob
    /// contents) is inserted idempotently alongside the commit itself. The
    /// shipped set is trusted to be closed; no validation happens here. An
    /// existing branch keeps its fork point and takes the shipped tip.
    pub fn raw_import(
        &mut self,
        commits: Vec<(ObjectId, Commit)>,
        branch_name: &str,
        branch_info: Branch,
    ) {
        for (id, commit) in commits {
            let mut blob_lines = Vec::new();
            let mut tree_lines = Vec::new();
            commit.tree().visit(&mut |line| match line {
                TreeLine::Blob { id, blob, .. } => blob_lines.push((id.clone(), blob.clone())),
                TreeLine::Tree { id, tree, .. } => tree_lines.push((id.clone(), tree.clone())),
            });

            self.insert_tree(commit.tree_id().clone(), commit.tree().clone());
            for (blob_id, blob) in blob_lines {
                self.insert_blob(blob_id, blob);
            }
            for (tree_id, tree) in tree_lines {
                self.insert_tree(tree_id, tree);
            }
            self.insert_commit(id, commit);
        }

        match self.branches.get_mut(branch_name) {
            Some(branch) => branch.tip = branch_info.tip,
            None => {
                self.branches.insert(branch_name.to_string(), branch_info);
            }
        }
    }

    /// Drop everything unreachable from the branch tips and HEAD
    ///
    /// Sweeps commits first, then the trees and blobs no surviving commit
    /// references.
    pub fn collect_garbage(&mut self) -> GcStats {
        let mut live_commits = HashSet::new();
        let mut roots: Vec<ObjectId> = self
            .branches
            .values()
            .filter_map(|branch| branch.tip.clone())
            .collect();
        roots.extend(self.resolve_head());

        for root in roots {
            for (id, _) in RevList::new(&self.commits, root) {
                live_commits.insert(id);
            }
        }

        let commits_before = self.commits.len();
        self.commits.retain(|id, _| live_commits.contains(id));

        let mut live_trees = HashSet::new();
        let mut live_blobs = HashSet::new();
        for commit in self.commits.values() {
            live_trees.insert(commit.tree_id().clone());
            commit.tree().visit(&mut |line| match line {
                TreeLine::Blob { id, .. } => {
                    live_blobs.insert(id.clone());
                }
                TreeLine::Tree { id, .. } => {
                    live_trees.insert(id.clone());
                }
            });
        }

        let trees_before = self.trees.len();
        let blobs_before = self.blobs.len();
        self.trees.retain(|id, _| live_trees.contains(id));
        self.blobs.retain(|id, _| live_blobs.contains(id));

        GcStats {
            commits: commits_before - self.commits.len(),
            trees: trees_before - self.trees.len(),
            blobs: blobs_before - self.blobs.len(),
        }
    }

    /// Check the referential-closure invariant
    ///
    /// Every commit's tree id must resolve in the tree store, every line of
    /// its embedded tree graph must resolve in the blob/tree stores, and
    /// every parent must resolve in the commit store.
    pub fn verify_closure(&self) -> Result<()> {
        for (id, commit) in &self.commits {
            if !self.trees.contains_key(commit.tree_id()) {
                return Err(Error::Corruption(format!(
                    "commit {} references missing tree {}",
                    id,
                    commit.tree_id()
                )));
            }

            for parent in commit.parents() {
                if !self.commits.contains_key(parent) {
                    return Err(Error::Corruption(format!(
                        "commit {} references missing parent {}",
                        id, parent
                    )));
                }
            }

            let mut missing = None;
            commit.tree().visit(&mut |line| {
                if missing.is_some() {
                    return;
                }
                let resolved = match line {
                    TreeLine::Blob { id, .. } => self.blobs.contains_key(id),
                    TreeLine::Tree { id, .. } => self.trees.contains_key(id),
                };
                if !resolved {
                    missing = Some(format!(
                        "commit {} references missing object {} at {}",
                        id,
                        line.id(),
                        line.path()
                    ));
                }
            });
            if let Some(message) = missing {
                return Err(Error::Corruption(message));
            }
        }

        Ok(())
    }

    /// Load the persisted state from `<root>/.git`
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(STORAGE_FILE);
        let bytes = std::fs::read(&path).with_path(&path)?;
        let storage: Storage = encoding::from_canonical_bytes(&bytes)?;
        storage.verify_closure()?;
        Ok(storage)
    }

    /// Write the whole state to `<root>/.git`
    pub fn store(&self, root: &Path) -> Result<()> {
        let path = root.join(STORAGE_FILE);
        let bytes = encoding::to_canonical_bytes(self)?;
        std::fs::write(&path, bytes).with_path(&path)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
