use crate::areas::repository::Repository;
use crate::artifacts::core::Error;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Switch HEAD to a branch or commit
    ///
    /// A branch name attaches to that branch. A commit id that happens to
    /// be some branch's tip attaches to that branch (first match in
    /// ascending name order); any other known commit id detaches HEAD.
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        if self.storage().branches().contains_key(target) {
            let tip = self.storage().branches()[target].tip.clone();
            if let Some(tip) = tip {
                let commit = self.lookup_commit(&tip)?;
                self.workspace().reset(&commit)?;
            }
            self.refs().attach_head(target);
            self.save()?;
            writeln!(self.writer(), "Switched to branch '{}'", target)?;
            return Ok(());
        }

        let id = self.refs().resolve_revision(target)?;
        let commit = self.lookup_commit(&id)?;
        self.workspace().reset(&commit)?;

        match self.refs().branch_for_tip(&id) {
            Some(branch) => {
                self.refs().attach_head(&branch);
                self.save()?;
                writeln!(self.writer(), "Switched to branch '{}'", branch)?;
            }
            None => {
                self.refs().detach_head(id.clone());
                self.save()?;
                writeln!(
                    self.writer(),
                    "HEAD is now at {} {}",
                    id.to_short_oid(),
                    commit.short_message()
                )?;
            }
        }

        Ok(())
    }

    /// Create a branch at HEAD (or at a revision) and switch to it
    pub fn checkout_new_branch(&mut self, name: &str, start: Option<&str>) -> anyhow::Result<()> {
        let at = match start {
            Some(revision) => Some(self.refs().resolve_revision(revision)?),
            None => self.storage().resolve_head(),
        };

        self.refs().create_branch(name, at.clone())?;
        if let Some(id) = at {
            let commit = self.lookup_commit(&id)?;
            self.workspace().reset(&commit)?;
        }
        self.refs().attach_head(name);
        self.save()?;

        writeln!(self.writer(), "Switched to a new branch '{}'", name)?;
        Ok(())
    }

    fn lookup_commit(&self, id: &ObjectId) -> anyhow::Result<Commit> {
        Ok(self
            .storage()
            .commits()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownRef(id.to_string()))?)
    }
}
