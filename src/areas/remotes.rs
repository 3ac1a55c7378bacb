//! Remotes manager
//!
//! Named peer URLs, borrowed from storage for the duration of a command.

use crate::artifacts::core::{Error, Result};
use crate::artifacts::refs::Remote;
use crate::areas::storage::Storage;
use derive_new::new;

#[derive(new)]
pub struct Remotes<'s> {
    storage: &'s mut Storage,
}

impl Remotes<'_> {
    pub fn list(&self) -> &[Remote] {
        self.storage.remotes()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.storage.find_remote(name).is_some()
    }

    pub fn add(&mut self, name: &str, url: &str) {
        self.storage
            .add_remote(Remote::new(name.to_string(), url.to_string()));
    }

    pub fn remove(&mut self, name: &str) -> Result<()> {
        if self.storage.remove_remote(name) {
            Ok(())
        } else {
            Err(Error::UnknownRef(name.to_string()))
        }
    }

    pub fn url_of(&self, name: &str) -> Result<String> {
        self.storage
            .find_remote(name)
            .map(|remote| remote.url.clone())
            .ok_or_else(|| Error::UnknownRef(name.to_string()))
    }
}
