use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;
use common::command::{
    commit_parents, init_repository_dir, linear_repository_dir, mit_commit, repository_dir,
    run_mit_command,
};

#[rstest]
fn init_creates_an_empty_repository(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty repository at .+\n$",
        )?);

    assert!(repository_dir.path().join(".git").exists());
    Ok(())
}

#[rstest]
fn init_twice_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_mit_command(init_repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    Ok(())
}

#[rstest]
fn commit_prints_a_full_object_id(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(init_repository_dir.path().join("a.txt"), "hello")?;

    run_mit_command(init_repository_dir.path(), &["commit", "-m", "c1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{64}\n$")?);

    Ok(())
}

#[rstest]
fn linear_history_links_each_commit_to_its_parent(
    linear_repository_dir: (TempDir, Vec<String>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, ids) = linear_repository_dir;
    let (c1, c2) = (&ids[0], &ids[1]);

    // the first commit is a root, the second points back at it
    assert_eq!(commit_parents(dir.path(), c1), Vec::<String>::new());
    assert_eq!(commit_parents(dir.path(), c2), vec![c1.clone()]);

    // master's tip is the second commit: checking the branch out again
    // materializes its snapshot
    run_mit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("a.txt"))?,
        "hello world"
    );

    Ok(())
}

#[rstest]
fn commit_on_an_empty_repository_is_a_root_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = mit_commit(init_repository_dir.path(), "empty snapshot");

    assert_eq!(
        commit_parents(init_repository_dir.path(), &id),
        Vec::<String>::new()
    );

    Ok(())
}

#[rstest]
fn committing_an_unchanged_tree_still_produces_a_new_commit(
    linear_repository_dir: (TempDir, Vec<String>),
) -> Result<(), Box<dyn std::error::Error>> {
    let (dir, ids) = linear_repository_dir;

    let c3 = mit_commit(dir.path(), "same tree again");

    assert!(!ids.contains(&c3));
    assert_eq!(commit_parents(dir.path(), &c3), vec![ids[1].clone()]);

    Ok(())
}

#[rstest]
fn commit_outside_a_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_mit_command(repository_dir.path(), &["commit", "-m", "nope"])
        .assert()
        .failure();

    Ok(())
}

#[rstest]
fn cat_file_rejects_a_malformed_id(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    // 63 characters: one short of a valid id
    let too_short = "a".repeat(63);

    run_mit_command(init_repository_dir.path(), &["cat-file", &too_short])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object id"));

    Ok(())
}
