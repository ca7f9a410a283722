use crate::common::command::{
    init_repository_dir, mygit_commit, mygit_stdout, repository_dir, run_mygit_command,
};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use predicates::Predicate;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn add_stages_nested_directories(repository_dir: TempDir) {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("top.txt"),
        "top".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("src/deep/inner.txt"),
        "inner".to_string(),
    ));

    run_mygit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    assert_eq!(
        mygit_stdout(repository_dir.path(), &["ls-files"]),
        "src/deep/inner.txt\ntop.txt\n"
    );

    let index = std::fs::read_to_string(repository_dir.path().join(".mygit/index"))
        .expect("Failed to read index");
    assert!(
        predicate::str::is_match(r"^100644 src/deep/inner.txt [0-9a-f]{40}\n100644 top.txt [0-9a-f]{40}\n?$")
            .unwrap()
            .eval(&index),
        "unexpected index {index:?}"
    );
}

#[rstest]
fn adding_a_file_twice_keeps_one_row(repository_dir: TempDir) {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let file = repository_dir.path().join("notes.txt");

    write_file(FileSpec::new(file.clone(), "draft".to_string()));
    run_mygit_command(repository_dir.path(), &["add", "notes.txt"])
        .assert()
        .success();
    write_file(FileSpec::new(file, "final".to_string()));
    run_mygit_command(repository_dir.path(), &["add", "notes.txt"])
        .assert()
        .success();

    assert_eq!(mygit_stdout(repository_dir.path(), &["ls-files"]), "notes.txt\n");
    run_mygit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to commit, working tree clean"));
}

#[rstest]
fn add_ignores_the_metadata_directory(repository_dir: TempDir) {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_generated_files(repository_dir.path(), 3);

    run_mygit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let listing = mygit_stdout(repository_dir.path(), &["ls-files"]);
    assert_eq!(listing.lines().count(), 3);
    assert!(!listing.contains(".mygit"));
}

#[rstest]
fn add_of_a_missing_path_leaves_the_index_untouched(repository_dir: TempDir) {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("present.txt"),
        "here".to_string(),
    ));

    run_mygit_command(repository_dir.path(), &["add", "present.txt", "absent.txt"])
        .assert()
        .failure();

    assert_eq!(mygit_stdout(repository_dir.path(), &["ls-files"]), "");
}

#[rstest]
fn rm_deletes_the_row_and_the_file(init_repository_dir: TempDir) {
    run_mygit_command(init_repository_dir.path(), &["rm", "a/2.txt"])
        .assert()
        .success()
        .stdout("rm 'a/2.txt'\n");

    init_repository_dir
        .child("a/2.txt")
        .assert(predicate::path::missing());
    assert_eq!(
        mygit_stdout(init_repository_dir.path(), &["ls-files"]),
        "1.txt\na/b/3.txt\n"
    );
}

#[rstest]
fn rm_cached_keeps_the_working_file(init_repository_dir: TempDir) {
    run_mygit_command(init_repository_dir.path(), &["rm", "--cached", "1.txt"])
        .assert()
        .success();

    init_repository_dir.child("1.txt").assert("one");
    run_mygit_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Untracked files:\n  1.txt\n"));
}

#[rstest]
fn rm_of_an_untracked_path_fails(init_repository_dir: TempDir) {
    run_mygit_command(init_repository_dir.path(), &["rm", "ghost.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in the index"));
}

#[rstest]
fn status_of_a_fresh_commit_is_clean(init_repository_dir: TempDir) {
    run_mygit_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with(
            "nothing to commit, working tree clean\n",
        ));
}

#[rstest]
fn status_reports_each_category(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "one, edited".to_string(),
    ));
    std::fs::remove_file(init_repository_dir.path().join("a/2.txt")).expect("Failed to remove file");
    write_file(FileSpec::new(
        init_repository_dir.path().join("z/new.txt"),
        "new".to_string(),
    ));

    let status = mygit_stdout(init_repository_dir.path(), &["status"]);

    assert_eq!(
        status,
        "Staged files:\n  a/b/3.txt\n\
         Modified files (not staged):\n  1.txt\n\
         Deleted files (in index, not in working tree):\n  a/2.txt\n\
         Untracked files:\n  z/new.txt\n"
    );
}

#[rstest]
fn commit_with_an_empty_index_fails(repository_dir: TempDir) {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    mygit_commit(repository_dir.path(), "empty")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("nothing to commit"));

    repository_dir
        .child(".mygit/refs/heads/main")
        .assert(predicate::path::missing());
}
