use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

mod common;
use common::command::{commit_parents, linear_repository_dir, mit_commit, run_mit_command};

/// Child daemon killed on drop so a failing test never leaks a listener
struct DaemonGuard {
    child: Child,
}

impl Drop for DaemonGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind an ephemeral port")
        .local_addr()
        .expect("Failed to read the ephemeral port")
        .port()
}

fn spawn_daemon(dir: &Path, port: u16) -> DaemonGuard {
    let child = Command::new(assert_cmd::cargo::cargo_bin("mit"))
        .current_dir(dir)
        .arg("daemon")
        .arg(port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to spawn the daemon");

    for _ in 0..50 {
        if TcpStream::connect(("127.0.0.1", port)).is_ok() {
            return DaemonGuard { child };
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    panic!("daemon did not start listening on port {}", port);
}

#[rstest]
fn clone_reproduces_the_served_branch(
    linear_repository_dir: (TempDir, Vec<String>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (server_dir, ids) = linear_repository_dir;
    let (c1, c2) = (&ids[0], &ids[1]);

    let port = free_port();
    let _daemon = spawn_daemon(server_dir.path(), port);

    let client_dir = TempDir::new()?;
    run_mit_command(
        client_dir.path(),
        &["clone", &format!("http://127.0.0.1:{}/", port), "master"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("Switched to branch 'master'"));

    // the full chain arrived, parents intact
    assert_eq!(commit_parents(client_dir.path(), c2), vec![c1.clone()]);
    assert_eq!(commit_parents(client_dir.path(), c1), Vec::<String>::new());

    // the workspace matches the served tip
    assert_eq!(
        std::fs::read_to_string(client_dir.path().join("a.txt"))?,
        "hello world"
    );

    run_mit_command(client_dir.path(), &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* master"));

    Ok(())
}

#[rstest]
fn push_is_idempotent(
    linear_repository_dir: (TempDir, Vec<String>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (server_dir, ids) = linear_repository_dir;
    let c2 = &ids[1];

    let port = free_port();
    let daemon = spawn_daemon(server_dir.path(), port);

    let client_dir = TempDir::new()?;
    run_mit_command(
        client_dir.path(),
        &["clone", &format!("http://127.0.0.1:{}/", port), "master"],
    )
    .assert()
    .success();

    std::fs::write(client_dir.path().join("b.txt"), "x")?;
    let c3 = mit_commit(client_dir.path(), "c3");

    for _ in 0..2 {
        run_mit_command(client_dir.path(), &["push", "origin", "master"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Pushed 3 commit(s)"));
    }

    // inspect the server's persisted state once the daemon is gone
    drop(daemon);

    assert_eq!(commit_parents(server_dir.path(), &c3), vec![c2.clone()]);

    let log = run_mit_command(server_dir.path(), &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let log = String::from_utf8(log)?;
    assert_eq!(
        log.matches(c3.as_str()).count(),
        1,
        "pushed commit listed more than once:\n{}",
        log
    );

    // master's tip moved to the pushed commit
    run_mit_command(server_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(server_dir.path().join("b.txt"))?, "x");

    Ok(())
}

#[rstest]
fn pull_of_an_unknown_branch_fails(
    linear_repository_dir: (TempDir, Vec<String>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (server_dir, _) = linear_repository_dir;

    let port = free_port();
    let _daemon = spawn_daemon(server_dir.path(), port);

    let client_dir = TempDir::new()?;
    run_mit_command(
        client_dir.path(),
        &["clone", &format!("http://127.0.0.1:{}/", port), "master"],
    )
    .assert()
    .success();

    run_mit_command(client_dir.path(), &["pull", "origin", "no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision"));

    Ok(())
}

#[rstest]
fn pull_refreshes_the_tracking_branch(
    linear_repository_dir: (TempDir, Vec<String>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (server_dir, _) = linear_repository_dir;

    let port = free_port();
    let _daemon = spawn_daemon(server_dir.path(), port);

    let client_dir = TempDir::new()?;
    run_mit_command(
        client_dir.path(),
        &["clone", &format!("http://127.0.0.1:{}/", port), "master"],
    )
    .assert()
    .success();

    run_mit_command(client_dir.path(), &["pull", "origin", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pulled 2 commit(s) into origin/master"));

    run_mit_command(client_dir.path(), &["branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("origin/master"));

    Ok(())
}

#[rstest]
fn push_without_the_remote_fails(
    linear_repository_dir: (TempDir, Vec<String>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, _) = linear_repository_dir;

    run_mit_command(dir.path(), &["push", "nowhere", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision"));

    Ok(())
}
