//! HTTP client side of the sync protocol
//!
//! One GET per pull, one POST per push, both against the remote's base URL.
//! Transport failures map to network errors; unexpected statuses and
//! undecodable bodies map to protocol errors.

use crate::artifacts::core::{Error, Result};
use crate::sync::protocol::{self, PullResponse, PushRequest};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

/// Fetch a branch's full reachable commit set from a peer
pub async fn fetch_branch(url: &str, branch: &str) -> Result<PullResponse> {
    let response = reqwest::Client::new()
        .get(url)
        .query(&[("branch", branch)])
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    match response.status() {
        StatusCode::OK => {
            let body = response
                .bytes()
                .await
                .map_err(|e| Error::Network(e.to_string()))?;
            protocol::decode(&body)
        }
        StatusCode::NOT_FOUND => Err(Error::UnknownRef(format!(
            "branch {} on remote {}",
            branch, url
        ))),
        status => Err(Error::Protocol(format!(
            "unexpected status {} from {}",
            status, url
        ))),
    }
}

/// Ship a branch's commit set to a peer
pub async fn send_branch(url: &str, request: &PushRequest) -> Result<()> {
    let body = protocol::encode(request)?;

    let response = reqwest::Client::new()
        .post(url)
        .header(CONTENT_TYPE, "application/cbor")
        .body(body)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if response.status() == StatusCode::OK {
        Ok(())
    } else {
        Err(Error::Protocol(format!(
            "unexpected status {} from {}",
            response.status(),
            url
        )))
    }
}
