use crate::areas::repository::Repository;
use crate::areas::storage::STORAGE_FILE;
use std::io::Write;
use std::path::PathBuf;

impl Repository {
    /// Create an empty repository rooted at `path`
    pub fn init(path: PathBuf, writer: Box<dyn Write + Send>) -> anyhow::Result<Self> {
        if path.join(STORAGE_FILE).exists() {
            anyhow::bail!("repository already exists at {}", path.display());
        }

        let repository = Repository::create(path, writer)?;
        writeln!(
            repository.writer(),
            "Initialized empty repository at {}",
            repository.path().display()
        )?;

        Ok(repository)
    }
}
