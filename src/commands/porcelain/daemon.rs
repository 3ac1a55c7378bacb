use crate::areas::repository::Repository;
use crate::sync::daemon;

impl Repository {
    /// Serve this repository's sync protocol until aborted
    pub async fn daemon(self, port: u16) -> anyhow::Result<()> {
        daemon::serve(self, port).await?;
        Ok(())
    }
}
