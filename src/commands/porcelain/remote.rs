use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn list_remotes(&self) -> anyhow::Result<()> {
        for remote in self.storage().remotes() {
            writeln!(self.writer(), "{}\t{}", remote.name, remote.url)?;
        }

        Ok(())
    }

    pub fn add_remote(&mut self, name: &str, url: &str) -> anyhow::Result<()> {
        if self.remotes().exists(name) {
            anyhow::bail!("remote {} already exists", name);
        }

        self.remotes().add(name, url);
        self.save()?;
        Ok(())
    }

    pub fn remove_remote(&mut self, name: &str) -> anyhow::Result<()> {
        self.remotes().remove(name)?;
        self.save()?;
        Ok(())
    }
}
