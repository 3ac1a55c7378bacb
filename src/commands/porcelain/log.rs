use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print every branch's history, newest commit first
    pub fn log(&self) -> anyhow::Result<()> {
        for (name, branch) in self.storage().branches() {
            writeln!(self.writer(), "Log for {}", name)?;

            let Some(tip) = branch.tip.clone() else {
                continue;
            };

            let mut commits = self.storage().reachable(tip);
            commits.sort_by(|a, b| b.1.timestamp().cmp(&a.1.timestamp()));

            for (id, commit) in commits {
                writeln!(
                    self.writer(),
                    "* {} - {} ({}) {}",
                    id.as_ref().yellow(),
                    commit.short_message(),
                    commit.timestamp().format("%Y/%m/%d %H:%M:%S"),
                    commit.author()
                )?;
            }
        }

        Ok(())
    }
}
