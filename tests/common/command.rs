use crate::common::file::{FileSpec, write_file};
use crate::common::{redirect_temp_dir, stdout_line};
use assert_cmd::Command;
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::Name;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed on `main`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_mygit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_mygit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    mygit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_mygit_command(dir: &Path, args: &[&str]) -> Command {
    let mut mygit_cmd = Command::cargo_bin("mygit").expect("Failed to find mygit binary");
    mygit_cmd.current_dir(dir).args(args).env_remove("MYGIT_LOG");
    mygit_cmd
}

/// `commit -m` under a generated author identity
pub fn mygit_commit(dir: &Path, message: &str) -> Command {
    let author_name = Name().fake::<String>();
    let author_email = FreeEmail().fake::<String>();

    let mut mygit_cmd = run_mygit_command(dir, &["commit", "-m", message]);
    mygit_cmd.envs(vec![
        ("GIT_AUTHOR_NAME", author_name),
        ("GIT_AUTHOR_EMAIL", author_email),
    ]);
    mygit_cmd
}

/// Stage everything and commit it
pub fn stage_and_commit(dir: &Path, message: &str) {
    run_mygit_command(dir, &["add", "."]).assert().success();
    mygit_commit(dir, message).assert().success();
}

/// Resolve `reference` through `rev-parse`
pub fn rev_parse(dir: &Path, reference: &str) -> String {
    let output = run_mygit_command(dir, &["rev-parse", reference])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    stdout_line(&output)
}

/// Captured stdout of a command expected to succeed
pub fn mygit_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_mygit_command(dir, args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8_lossy(&output).to_string()
}
