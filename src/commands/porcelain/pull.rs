use crate::areas::repository::Repository;
use crate::sync::client;
use std::io::Write;

impl Repository {
    /// Fetch a branch's reachable set from a remote into the local stores
    ///
    /// The imported commits land under the tracking branch
    /// `<remote>/<branch>`.
    pub async fn pull(&mut self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let url = self.remotes().url_of(remote)?;
        let response = client::fetch_branch(&url, branch).await?;

        let imported = response.commits.len();
        let tracking = format!("{}/{}", remote, branch);
        self.storage_mut()
            .raw_import(response.commits, &tracking, response.branch_info);
        self.save()?;

        writeln!(
            self.writer(),
            "Pulled {} commit(s) into {}",
            imported,
            tracking
        )?;

        Ok(())
    }
}
