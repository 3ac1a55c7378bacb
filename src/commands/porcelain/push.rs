use crate::areas::repository::Repository;
use crate::artifacts::core::Error;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::sync::client;
use crate::sync::protocol::PushRequest;
use std::io::Write;

impl Repository {
    /// Ship a local branch's full reachable set to a remote
    ///
    /// The request carries the tip we last saw under the tracking branch so
    /// the peer could compute a delta; shipping stays whole-history either
    /// way. On success the tracking branch moves to the pushed tip.
    pub async fn push(&mut self, remote: &str, branch: &str) -> anyhow::Result<()> {
        let url = self.remotes().url_of(remote)?;
        let branch_info = self
            .storage()
            .branches()
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::UnknownRef(branch.to_string()))?;

        let commits: Vec<(ObjectId, Commit)> = match &branch_info.tip {
            Some(tip) => self
                .storage()
                .reachable(tip.clone())
                .into_iter()
                .map(|(id, commit)| (id, commit.clone()))
                .collect(),
            None => Vec::new(),
        };
        let shipped = commits.len();

        let tracking = format!("{}/{}", remote, branch);
        let latest_remote_branch_position = self
            .storage()
            .branches()
            .get(&tracking)
            .and_then(|b| b.tip.clone());

        client::send_branch(
            &url,
            &PushRequest {
                branch: branch.to_string(),
                branch_info: branch_info.clone(),
                latest_remote_branch_position,
                commits,
            },
        )
        .await?;

        self.refs().add_or_set_branch(&tracking, branch_info);
        self.save()?;

        writeln!(
            self.writer(),
            "Pushed {} commit(s) to {}",
            shipped,
            tracking
        )?;

        Ok(())
    }
}
