use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, Utc};
use std::io::Write;

impl Repository {
    /// Snapshot the whole working tree as a new commit and advance HEAD
    ///
    /// Every scanned blob and tree is inserted idempotently, so committing
    /// an unchanged tree still succeeds (the timestamp makes the id fresh).
    pub fn commit(
        &mut self,
        message: &str,
        author: &str,
        timestamp: DateTime<Utc>,
    ) -> anyhow::Result<ObjectId> {
        let products = self.workspace().scan()?;

        for (id, blob) in products.blobs {
            self.storage_mut().insert_blob(id, blob);
        }
        for (id, tree) in products.trees {
            self.storage_mut().insert_tree(id, tree);
        }

        let parents: Vec<ObjectId> = self.storage().resolve_head().into_iter().collect();
        let commit = Commit::new(
            timestamp,
            author.to_string(),
            message.to_string(),
            products.root,
            products.root_id,
            parents,
        );
        let id = commit.object_id()?;

        self.storage_mut().insert_commit(id.clone(), commit);
        self.refs().advance_head(id.clone());
        self.save()?;

        writeln!(self.writer(), "{}", id)?;
        Ok(id)
    }
}
