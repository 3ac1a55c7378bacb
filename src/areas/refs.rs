//! Reference manager
//!
//! Borrows the storage for the duration of one command and performs every
//! HEAD/branch mutation: attaching, detaching, advancing after a commit,
//! and branch creation/deletion. Revision strings (`HEAD`, `HEAD~n`, branch
//! names, full ids) resolve here too.

use crate::artifacts::core::{Error, Result};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::refs::{Branch, Head};
use crate::areas::storage::Storage;
use derive_new::new;

/// Branch and HEAD operations over a borrowed storage
#[derive(new)]
pub struct Refs<'s> {
    storage: &'s mut Storage,
}

impl Refs<'_> {
    /// HEAD's effective commit id, if any commit exists under it
    pub fn resolve_head(&self) -> Option<ObjectId> {
        self.storage.resolve_head()
    }

    pub fn attach_head(&mut self, branch: &str) {
        self.storage.set_head(Head::Attached {
            branch: branch.to_string(),
        });
    }

    pub fn detach_head(&mut self, id: ObjectId) {
        self.storage.set_head(Head::Detached { id });
    }

    /// Move the current reference to a freshly created commit
    ///
    /// Detached HEAD moves itself; attached HEAD moves its branch's tip.
    pub fn advance_head(&mut self, new_id: ObjectId) {
        match self.storage.head().clone() {
            Head::Detached { .. } => self.detach_head(new_id),
            Head::Attached { branch } => self.storage.set_branch_tip(&branch, Some(new_id)),
        }
    }

    /// Insert a new branch forked at `at`
    pub fn create_branch(&mut self, name: &str, at: Option<ObjectId>) -> Result<()> {
        if self.storage.branches().contains_key(name) {
            return Err(Error::BranchExists(name.to_string()));
        }
        self.storage
            .insert_branch(name, Branch::new(at.clone(), at));
        Ok(())
    }

    /// Remove a branch; the currently checked-out branch is protected
    pub fn delete_branch(&mut self, name: &str) -> Result<Branch> {
        if self.storage.head().branch() == Some(name) {
            return Err(Error::BranchCheckedOut(name.to_string()));
        }
        self.storage
            .remove_branch(name)
            .ok_or_else(|| Error::UnknownRef(name.to_string()))
    }

    /// Point `name` at the given branch info, creating it if needed
    ///
    /// An existing branch keeps its fork point and takes the new tip.
    pub fn add_or_set_branch(&mut self, name: &str, info: Branch) {
        if self.storage.branches().contains_key(name) {
            self.storage.set_branch_tip(name, info.tip);
        } else {
            self.storage.insert_branch(name, info);
        }
    }

    /// First branch (in ascending name order) whose tip is the given commit
    pub fn branch_for_tip(&self, id: &ObjectId) -> Option<String> {
        self.storage
            .branches()
            .iter()
            .find(|(_, branch)| branch.tip.as_ref() == Some(id))
            .map(|(name, _)| name.clone())
    }

    /// Resolve HEAD and follow first parents `n` times
    pub fn head_ref(&self, n: usize) -> Result<ObjectId> {
        let mut id = self
            .resolve_head()
            .ok_or_else(|| Error::UnknownRef("HEAD".to_string()))?;

        for step in 0..n {
            let commit = self
                .storage
                .commits()
                .get(&id)
                .ok_or_else(|| Error::UnknownRef(id.to_string()))?;
            id = commit
                .parent()
                .cloned()
                .ok_or(Error::NoParent(step + 1))?;
        }

        Ok(id)
    }

    /// Resolve a revision string to a commit id
    ///
    /// Accepts `HEAD`, `HEAD~n`, a branch name with a tip, or a full object
    /// id present in the commit store.
    pub fn resolve_revision(&self, revision: &str) -> Result<ObjectId> {
        if revision == "HEAD" {
            return self.head_ref(0);
        }
        if let Some(steps) = revision.strip_prefix("HEAD~") {
            let steps: usize = steps
                .parse()
                .map_err(|_| Error::UnknownRef(revision.to_string()))?;
            return self.head_ref(steps);
        }
        if let Some(branch) = self.storage.branches().get(revision) {
            return branch
                .tip
                .clone()
                .ok_or_else(|| Error::UnknownRef(revision.to_string()));
        }

        let id = ObjectId::try_parse(revision)
            .map_err(|_| Error::UnknownRef(revision.to_string()))?;
        if self.storage.commits().contains_key(&id) {
            Ok(id)
        } else {
            Err(Error::UnknownRef(revision.to_string()))
        }
    }
}
