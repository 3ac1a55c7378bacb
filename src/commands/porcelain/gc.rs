use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Drop every commit, tree, and blob unreachable from the references
    pub fn gc(&mut self) -> anyhow::Result<()> {
        let stats = self.storage_mut().collect_garbage();
        self.save()?;

        writeln!(
            self.writer(),
            "Removed {} commit(s), {} tree(s), {} blob(s)",
            stats.commits,
            stats.trees,
            stats.blobs
        )?;

        Ok(())
    }
}
