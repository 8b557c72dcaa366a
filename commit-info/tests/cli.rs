use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use tempfile::TempDir;

fn git_commit_info(cwd: &Path, args: &[&str]) -> Output {
    escargot::CargoBuild::new()
        .bin("git-commit-info")
        .package("git-commit-info")
        .current_target()
        .run()
        .unwrap()
        .command()
        .current_dir(cwd)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .env_remove("RUST_LOG")
        .env("GIT_CEILING_DIRECTORIES", cwd.parent().unwrap())
        .args(args)
        .output()
        .unwrap()
}

fn git(cwd: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(cwd)
        .args(["-c", "user.name=Stamp", "-c", "user.email=stamp@example.com"])
        .args(args)
        .env_remove("GIT_DIR")
        .env_remove("GIT_WORK_TREE")
        .status()
        .unwrap();
    assert!(status.success(), "git {args:?} failed");
}

fn git_installed() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

#[test]
fn test_help_lists_the_keys() {
    let tmp = TempDir::new().unwrap();
    let result = git_commit_info(tmp.path(), &["--help"]);

    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).expect("stdout is UTF-8 string");
    for key in ["--namespace", "--class", "--output", "--line-ending"] {
        assert!(stdout.contains(key), "{key} missing from help");
    }
}

#[test]
fn test_invalid_config_exits_minus_one_without_output() {
    let tmp = TempDir::new().unwrap();

    let result = git_commit_info(tmp.path(), &["indent=sideways"]);

    // -1, truncated to a byte by the OS
    assert_eq!(result.status.code(), Some(255));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("sideways"), "{stderr}");
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(!tmp.path().join("GitCommitInfo.cs").exists());
}

#[test]
fn test_outside_a_repository_passes_on_gits_exit_code() {
    if !git_installed() {
        eprintln!("git not installed, skipping");
        return;
    }
    let tmp = TempDir::new().unwrap();

    let result = git_commit_info(tmp.path(), &[]);

    // git reports "not a git repository" with 128
    assert_eq!(result.status.code(), Some(128));
    assert!(!tmp.path().join("GitCommitInfo.cs").exists());
}

#[test]
fn test_generates_from_a_real_repository() {
    if !git_installed() {
        eprintln!("git not installed, skipping");
        return;
    }
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path();
    git(repo, &["init", "-q"]);
    git(repo, &["symbolic-ref", "HEAD", "refs/heads/stamp"]);
    git(repo, &["commit", "-q", "--allow-empty", "-m", "initial"]);

    let result = git_commit_info(repo, &["ns=Foo.Bar", "/output", "gen/Info.cs"]);
    assert!(
        result.status.success(),
        "{}",
        String::from_utf8_lossy(&result.stderr)
    );

    let generated = repo.join("gen/Info.cs");
    let out = fs::read_to_string(&generated).unwrap();
    assert!(out.starts_with("namespace Foo.Bar\n{\n"));
    assert!(out.contains("get { return \"stamp\"; }"));
    let before = fs::metadata(&generated).unwrap().modified().unwrap();

    let result = git_commit_info(repo, &["ns=Foo.Bar", "/output", "gen/Info.cs"]);
    assert!(result.status.success());
    // Silent on success at the default log level.
    assert!(result.stderr.is_empty(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(fs::read_to_string(&generated).unwrap(), out);
    assert_eq!(fs::metadata(&generated).unwrap().modified().unwrap(), before);
}
