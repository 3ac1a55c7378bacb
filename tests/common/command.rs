use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_mit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with the two-commit linear history most scenarios start from:
/// `a.txt = "hello"` at the first commit, `a.txt = "hello world"` at the
/// second. Returns the directory and both commit ids in order.
#[fixture]
pub fn linear_repository_dir(init_repository_dir: TempDir) -> (TempDir, Vec<String>) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("a.txt"), "hello".to_string()));
    let c1 = mit_commit(dir.path(), "c1");

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "hello world".to_string(),
    ));
    let c2 = mit_commit(dir.path(), "c2");

    (dir, vec![c1, c2])
}

pub fn run_mit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("mit").expect("Failed to find mit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

fn generate_random_author() -> String {
    use fake::Fake;
    use fake::faker::name::en::Name;

    Name().fake::<String>().replace(" ", "_")
}

/// Run `mit commit -m <message>` with a random author and return the new
/// commit id printed on stdout
pub fn mit_commit(dir: &Path, message: &str) -> String {
    let mut cmd = run_mit_command(dir, &["commit", "-m", message]);
    cmd.env("MIT_AUTHOR", generate_random_author());

    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone())
        .expect("commit output is not utf-8")
        .trim()
        .to_string()
}

/// Read a commit's parent ids through cat-file
pub fn commit_parents(dir: &Path, id: &str) -> Vec<String> {
    let output = run_mit_command(dir, &["cat-file", id])
        .output()
        .expect("Failed to run cat-file");
    let stdout = String::from_utf8(output.stdout).expect("cat-file output is not utf-8");

    stdout
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .map(|parent| parent.to_string())
        .collect()
}
