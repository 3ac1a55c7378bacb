use crate::areas::repository::Repository;
use crate::artifacts::core::Error;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::TreeLine;
use std::io::Write;

impl Repository {
    /// Print the content of any stored object by id
    ///
    /// Commits print a header block followed by the message, trees one line
    /// per entry, blobs their raw content.
    pub fn cat_file(&self, id: &str) -> anyhow::Result<()> {
        let id = ObjectId::try_parse(id)?;

        if let Some(commit) = self.storage().commits().get(&id) {
            writeln!(self.writer(), "commit {}", id)?;
            writeln!(self.writer(), "tree {}", commit.tree_id())?;
            for parent in commit.parents() {
                writeln!(self.writer(), "parent {}", parent)?;
            }
            writeln!(self.writer(), "author {}", commit.author())?;
            writeln!(
                self.writer(),
                "date {}",
                commit.timestamp().format("%Y/%m/%d %H:%M:%S")
            )?;
            writeln!(self.writer())?;
            writeln!(self.writer(), "{}", commit.message())?;
        } else if let Some(tree) = self.storage().trees().get(&id) {
            for line in tree.lines() {
                match line {
                    TreeLine::Blob { id, path, .. } => {
                        writeln!(self.writer(), "blob {} {}", id, path)?
                    }
                    TreeLine::Tree { id, path, .. } => {
                        writeln!(self.writer(), "tree {} {}", id, path)?
                    }
                }
            }
        } else if let Some(blob) = self.storage().blobs().get(&id) {
            write!(self.writer(), "{}", blob.content())?;
        } else {
            return Err(Error::UnknownRef(id.to_string()).into());
        }

        Ok(())
    }
}
