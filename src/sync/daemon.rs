//! Request/response daemon
//!
//! Serves the sync protocol over HTTP on localhost: GET answers pulls, POST
//! accepts pushes. The repository sits behind a mutex, so requests are
//! handled one at a time. A handler failure answers 500 and the daemon
//! keeps serving; Ctrl-C aborts the accept loop.

use crate::areas::repository::Repository;
use crate::artifacts::core::{Error, Result};
use crate::sync::protocol::{self, PullResponse, PushRequest};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

struct DaemonState {
    repository: Mutex<Repository>,
}

#[derive(Deserialize)]
struct PullParams {
    branch: String,
}

/// Serve the sync protocol on `127.0.0.1:<port>` until aborted
pub async fn serve(repository: Repository, port: u16) -> Result<()> {
    let state = Arc::new(DaemonState {
        repository: Mutex::new(repository),
    });
    let router = Router::new()
        .route("/", get(handle_pull).post(handle_push))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .map_err(|e| Error::Network(format!("cannot bind 127.0.0.1:{}: {}", port, e)))?;
    tracing::info!(port, "serving sync protocol");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Network(e.to_string()))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("daemon shutting down");
}

async fn handle_pull(
    State(state): State<Arc<DaemonState>>,
    Query(params): Query<PullParams>,
) -> Response {
    let repository = state.repository.lock().await;

    let Some(branch_info) = repository.storage().branches().get(&params.branch).cloned() else {
        tracing::warn!(branch = %params.branch, "pull for unknown branch");
        return StatusCode::NOT_FOUND.into_response();
    };

    let commits: Vec<_> = match &branch_info.tip {
        Some(tip) => repository
            .storage()
            .reachable(tip.clone())
            .into_iter()
            .map(|(id, commit)| (id, commit.clone()))
            .collect(),
        None => Vec::new(),
    };
    let shipped = commits.len();

    match protocol::encode(&PullResponse {
        branch_info,
        commits,
    }) {
        Ok(body) => {
            tracing::info!(branch = %params.branch, commits = shipped, "served pull");
            ([(header::CONTENT_TYPE, "application/cbor")], body).into_response()
        }
        Err(e) => {
            tracing::error!(branch = %params.branch, error = %e, "pull failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn handle_push(State(state): State<Arc<DaemonState>>, body: Bytes) -> StatusCode {
    let request: PushRequest = match protocol::decode(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "undecodable push request");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    tracing::info!(
        branch = %request.branch,
        commits = request.commits.len(),
        position = ?request.latest_remote_branch_position,
        "received push"
    );

    let mut repository = state.repository.lock().await;
    let branch = request.branch;
    repository
        .storage_mut()
        .raw_import(request.commits, &branch, request.branch_info);

    match repository.save() {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::error!(branch = %branch, error = %e, "push failed to persist");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
