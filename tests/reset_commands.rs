use crate::common::command::{
    init_repository_dir, mygit_stdout, rev_parse, run_mygit_command, stage_and_commit,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::{fixture, rstest};

mod common;

/// `init_repository_dir` plus a second commit that edits `1.txt` and adds
/// `extra.txt`
#[fixture]
fn two_commit_repository_dir(init_repository_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "one, edited".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("extra.txt"),
        "extra".to_string(),
    ));
    stage_and_commit(init_repository_dir.path(), "Second commit");

    init_repository_dir
}

/// Parent of HEAD, i.e. the initial commit
fn first_commit(dir: &TempDir) -> String {
    let head = rev_parse(dir.path(), "HEAD");

    mygit_stdout(dir.path(), &["cat-file", "-p", &head])
        .lines()
        .find_map(|line| line.strip_prefix("parent "))
        .expect("second commit has a parent")
        .to_string()
}

#[rstest]
fn soft_reset_only_moves_head(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir;
    let first = first_commit(&dir);
    let index_before = read_file(&dir.path().join(".mygit/index"));

    run_mygit_command(dir.path(), &["reset", "--soft", &first])
        .assert()
        .success()
        .stdout(format!("HEAD is now at {}\n", &first[..7]));

    assert_eq!(rev_parse(dir.path(), "main"), first);
    assert_eq!(read_file(&dir.path().join(".mygit/index")), index_before);
    dir.child("1.txt").assert("one, edited");
}

#[rstest]
fn mixed_reset_rewrites_the_index(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir;
    let first = first_commit(&dir);

    run_mygit_command(dir.path(), &["reset", &first])
        .assert()
        .success();

    assert_eq!(rev_parse(dir.path(), "HEAD"), first);
    assert_eq!(
        mygit_stdout(dir.path(), &["ls-files"]),
        "1.txt\na/2.txt\na/b/3.txt\n"
    );
    dir.child("1.txt").assert("one, edited");
    run_mygit_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Modified files (not staged):\n  1.txt\n"))
        .stdout(predicate::str::contains("Untracked files:\n  extra.txt\n"));
}

#[rstest]
fn hard_reset_restores_files_and_keeps_strays(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir;
    let first = first_commit(&dir);

    run_mygit_command(dir.path(), &["reset", "--hard", &first])
        .assert()
        .success();

    dir.child("1.txt").assert("one");
    // not named by the target tree, so never deleted
    dir.child("extra.txt").assert("extra");
    assert_eq!(
        mygit_stdout(dir.path(), &["ls-files"]),
        "1.txt\na/2.txt\na/b/3.txt\n"
    );
}

#[rstest]
fn soft_after_hard_changes_nothing_but_head(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir;
    let first = first_commit(&dir);

    run_mygit_command(dir.path(), &["reset", "--hard", &first])
        .assert()
        .success();
    let index_after_hard = read_file(&dir.path().join(".mygit/index"));
    let status_after_hard = mygit_stdout(dir.path(), &["status"]);

    run_mygit_command(dir.path(), &["reset", "--soft", &first])
        .assert()
        .success();

    assert_eq!(read_file(&dir.path().join(".mygit/index")), index_after_hard);
    assert_eq!(mygit_stdout(dir.path(), &["status"]), status_after_hard);
    assert_eq!(rev_parse(dir.path(), "HEAD"), first);
}

#[rstest]
fn hard_reset_to_head_discards_edits(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("a/2.txt"),
        "scribbles".to_string(),
    ));
    std::fs::remove_file(init_repository_dir.path().join("a/b/3.txt")).expect("Failed to remove file");

    run_mygit_command(init_repository_dir.path(), &["reset", "--hard"])
        .assert()
        .success();

    init_repository_dir.child("a/2.txt").assert("two");
    init_repository_dir.child("a/b/3.txt").assert("three");
}

#[rstest]
fn reset_modes_are_mutually_exclusive(init_repository_dir: TempDir) {
    run_mygit_command(init_repository_dir.path(), &["reset", "--soft", "--hard", "HEAD"])
        .assert()
        .failure();
}

#[rstest]
fn reset_to_an_unknown_name_changes_nothing(init_repository_dir: TempDir) {
    let head = rev_parse(init_repository_dir.path(), "HEAD");

    run_mygit_command(init_repository_dir.path(), &["reset", "--hard", "nowhere"])
        .assert()
        .code(3);

    assert_eq!(rev_parse(init_repository_dir.path(), "HEAD"), head);
}

#[rstest]
fn hard_reset_never_removes_a_directory_in_a_tracked_path(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head = rev_parse(dir, "HEAD");
    let index_before = read_file(&dir.join(".mygit/index"));
    std::fs::remove_file(dir.join("1.txt")).expect("Failed to remove file");
    write_file(FileSpec::new(
        dir.join("1.txt/precious.txt"),
        "precious".to_string(),
    ));

    run_mygit_command(dir, &["reset", "--hard", "HEAD"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Refusing to replace directory"));

    init_repository_dir
        .child("1.txt/precious.txt")
        .assert("precious");
    assert_eq!(rev_parse(dir, "HEAD"), head);
    assert_eq!(read_file(&dir.join(".mygit/index")), index_before);
}

#[rstest]
fn hard_reset_with_an_unreadable_blob_changes_nothing(two_commit_repository_dir: TempDir) {
    let dir = two_commit_repository_dir;
    let first = first_commit(&dir);
    let second = rev_parse(dir.path(), "HEAD");
    let index_before = read_file(&dir.path().join(".mygit/index"));

    // a/2.txt is unchanged since the first commit, so its blob is needed
    let blob_id = mygit_stdout(dir.path(), &["hash-object", "a/2.txt"])
        .trim()
        .to_string();
    let object_path = dir
        .path()
        .join(".mygit/objects")
        .join(&blob_id[..2])
        .join(&blob_id[2..]);
    std::fs::remove_file(&object_path).expect("Failed to remove object");
    std::fs::write(&object_path, b"not zlib at all").expect("Failed to corrupt object");

    run_mygit_command(dir.path(), &["reset", "--hard", &first])
        .assert()
        .code(2);

    assert_eq!(rev_parse(dir.path(), "HEAD"), second);
    assert_eq!(rev_parse(dir.path(), "main"), second);
    assert_eq!(read_file(&dir.path().join(".mygit/index")), index_before);
    dir.child("1.txt").assert("one, edited");
}
