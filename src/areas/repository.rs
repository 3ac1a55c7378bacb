//! Repository abstraction and coordination
//!
//! `Repository` ties the persisted state to the working directory and hands
//! out the reference/remote managers. Every command follows the same
//! lifecycle: open (load `.git`), operate in memory, save (rewrite `.git`).
//! A failed operation leaves the file untouched.

use crate::artifacts::core::Result;
use crate::areas::refs::Refs;
use crate::areas::remotes::Remotes;
use crate::areas::storage::Storage;
use crate::areas::workspace::Workspace;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write + Send>>,
    /// Persisted state, mutated in memory
    storage: Storage,
    /// Working directory
    workspace: Workspace,
}

impl Repository {
    /// Open an existing repository rooted at `path`
    pub fn open(path: PathBuf, writer: Box<dyn std::io::Write + Send>) -> Result<Self> {
        let storage = Storage::load(&path)?;
        Ok(Self::assemble(path, writer, storage))
    }

    /// Create a fresh repository rooted at `path` and persist it
    pub fn create(path: PathBuf, writer: Box<dyn std::io::Write + Send>) -> Result<Self> {
        let storage = Storage::new();
        storage.store(&path)?;
        Ok(Self::assemble(path, writer, storage))
    }

    fn assemble(path: PathBuf, writer: Box<dyn std::io::Write + Send>, storage: Storage) -> Self {
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            storage,
            workspace,
        }
    }

    /// Persist the in-memory state wholesale
    pub fn save(&self) -> Result<()> {
        self.storage.store(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write + Send>> {
        self.writer.borrow_mut()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&mut self) -> Refs<'_> {
        Refs::new(&mut self.storage)
    }

    pub fn remotes(&mut self) -> Remotes<'_> {
        Remotes::new(&mut self.storage)
    }
}
