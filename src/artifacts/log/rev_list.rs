//! History traversal
//!
//! `RevList` walks a commit store depth-first from a starting commit,
//! following parent links. The commit graph is acyclic by construction (an
//! id depends on the parent ids), but the walk still deduplicates and runs
//! iteratively rather than recursing.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, HashSet};

/// Iterator over the commits reachable from a starting point
///
/// Yields `(id, commit)` pairs in traversal order: the start first, then
/// ancestors. An optional `down_to` id cuts the walk and is itself excluded
/// from the result.
pub struct RevList<'s> {
    commits: &'s BTreeMap<ObjectId, Commit>,
    stack: Vec<ObjectId>,
    seen: HashSet<ObjectId>,
    down_to: Option<ObjectId>,
}

impl<'s> RevList<'s> {
    pub fn new(commits: &'s BTreeMap<ObjectId, Commit>, from: ObjectId) -> Self {
        RevList {
            commits,
            stack: vec![from],
            seen: HashSet::new(),
            down_to: None,
        }
    }

    /// Stop the walk at (and exclude) the given commit
    pub fn down_to(mut self, stop: ObjectId) -> Self {
        self.down_to = Some(stop);
        self
    }
}

impl<'s> Iterator for RevList<'s> {
    type Item = (ObjectId, &'s Commit);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if self.seen.contains(&id) || self.down_to.as_ref() == Some(&id) {
                continue;
            }
            self.seen.insert(id.clone());

            // Missing parents end that part of the walk; closure violations
            // are caught when the state file is loaded, not here.
            let Some(commit) = self.commits.get(&id) else {
                continue;
            };

            // Reverse push so the first parent is walked first
            for parent in commit.parents().iter().rev() {
                if !self.seen.contains(parent) {
                    self.stack.push(parent.clone());
                }
            }

            return Some((id, commit));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::object::Object;
    use crate::artifacts::objects::tree::Tree;
    use chrono::TimeZone;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn push_commit(
        commits: &mut BTreeMap<ObjectId, Commit>,
        millis: i64,
        parents: Vec<ObjectId>,
    ) -> ObjectId {
        let tree = Tree::new(vec![]);
        let tree_id = tree.object_id().unwrap();
        let commit = Commit::new(
            Utc.timestamp_millis_opt(millis).unwrap(),
            "author".to_string(),
            format!("commit at {}", millis),
            tree,
            tree_id,
            parents,
        );
        let id = commit.object_id().unwrap();
        commits.insert(id.clone(), commit);
        id
    }

    #[test]
    fn walks_full_chain_to_the_root() {
        let mut commits = BTreeMap::new();
        let c1 = push_commit(&mut commits, 1, vec![]);
        let c2 = push_commit(&mut commits, 2, vec![c1.clone()]);
        let c3 = push_commit(&mut commits, 3, vec![c2.clone()]);

        let walked: Vec<ObjectId> = RevList::new(&commits, c3.clone())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(walked, vec![c3, c2, c1]);
    }

    #[test]
    fn down_to_is_excluded_and_cuts_the_walk() {
        let mut commits = BTreeMap::new();
        let c1 = push_commit(&mut commits, 1, vec![]);
        let c2 = push_commit(&mut commits, 2, vec![c1.clone()]);
        let c3 = push_commit(&mut commits, 3, vec![c2.clone()]);

        let walked: Vec<ObjectId> = RevList::new(&commits, c3.clone())
            .down_to(c1)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(walked, vec![c3, c2]);
    }

    #[test]
    fn yields_no_duplicates() {
        let mut commits = BTreeMap::new();
        let c1 = push_commit(&mut commits, 1, vec![]);
        let c2 = push_commit(&mut commits, 2, vec![c1.clone()]);

        let walked: Vec<ObjectId> = RevList::new(&commits, c2).map(|(id, _)| id).collect();
        let mut deduped = walked.clone();
        deduped.dedup();
        assert_eq!(walked, deduped);
    }

    #[test]
    fn unknown_start_yields_nothing() {
        let commits = BTreeMap::new();
        let missing = ObjectId::try_parse("ab".repeat(32)).unwrap();
        assert_eq!(RevList::new(&commits, missing).count(), 0);
    }
}
