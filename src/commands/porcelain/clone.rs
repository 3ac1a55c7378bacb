use crate::areas::repository::Repository;
use crate::artifacts::refs::{Branch, DEFAULT_BRANCH};
use std::io::Write;
use std::path::PathBuf;

/// Name given to the remote a clone bootstraps from
const ORIGIN: &str = "origin";

impl Repository {
    /// Bootstrap a repository from a peer
    ///
    /// Initializes an empty repository, registers `origin`, pulls the
    /// requested branch, points `master` at the pulled tip, and checks
    /// `master` out.
    pub async fn clone_from(
        path: PathBuf,
        writer: Box<dyn Write + Send>,
        url: &str,
        branch: &str,
    ) -> anyhow::Result<Self> {
        let mut repository = Repository::init(path, writer)?;

        repository.remotes().add(ORIGIN, url);
        repository.pull(ORIGIN, branch).await?;

        let tracking = format!("{}/{}", ORIGIN, branch);
        let tip = repository
            .storage()
            .branches()
            .get(&tracking)
            .and_then(|b| b.tip.clone());
        repository
            .refs()
            .add_or_set_branch(DEFAULT_BRANCH, Branch::new(tip.clone(), tip));

        repository.checkout(DEFAULT_BRANCH)?;
        Ok(repository)
    }
}
