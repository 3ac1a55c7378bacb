use crate::areas::repository::Repository;
use crate::artifacts::refs::Head;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// List branches in ascending name order, marking the current one
    pub fn list_branches(&self) -> anyhow::Result<()> {
        let head = self.storage().head().clone();

        if let Head::Detached { id } = &head {
            let notice = format!("(HEAD detached at {})", id.to_short_oid());
            writeln!(self.writer(), "* {}", notice.green())?;
        }

        for name in self.storage().branches().keys() {
            if head.branch() == Some(name.as_str()) {
                writeln!(self.writer(), "* {}", name.as_str().green())?;
            } else {
                writeln!(self.writer(), "  {}", name)?;
            }
        }

        Ok(())
    }

    /// Delete a branch; the checked-out branch is protected
    pub fn delete_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch = self.refs().delete_branch(name)?;
        self.save()?;

        let position = branch
            .tip
            .map(|tip| tip.to_short_oid())
            .unwrap_or_else(|| "unborn".to_string());
        writeln!(self.writer(), "Deleted branch {} (was {})", name, position)?;

        Ok(())
    }
}
