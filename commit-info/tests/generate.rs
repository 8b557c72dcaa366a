use std::{fs, thread, time::Duration};

use git_commit_info::{ExitStatus, test_utils::Fixture};

#[test]
fn it_generates_with_defaults() {
    let fx = Fixture::builder().build();

    assert_eq!(fx.run(""), ExitStatus::Success);

    let out = fx.output().unwrap();
    assert!(out.starts_with("/// <summary>\n"));
    assert!(out.contains("public class GitCommitInfo\n"));
    assert!(out.contains("    public string BranchName\n    {\n        get { return \"main\"; }\n    }\n"));
    assert!(out.contains("get { return \"a1b2c3d\"; }"));
    assert!(out.contains("get { return \"a1b2c3d4e5f60718293a4b5c6d7e8f9012345678\"; }"));
    assert!(out.contains("get { return \"2024-01-15 10:00:00 +0000\"; }"));
    assert_eq!(fx.git.calls(), ["head_commit", "head_branch"]);
}

#[test]
fn it_wraps_in_namespace_with_internal_class() {
    let fx = Fixture::builder().build();

    assert_eq!(
        fx.run("ns=Foo.Bar access-modifier=internal"),
        ExitStatus::Success
    );

    let out = fx.output().unwrap();
    assert!(out.starts_with("namespace Foo.Bar\n{\n    /// <summary>\n"));
    assert!(out.contains("\n    internal class GitCommitInfo\n    {\n"));
    assert!(out.ends_with("    }\n}\n"));
}

#[test]
fn it_rejects_malformed_commit_line_without_writing() {
    let fx = Fixture::builder().commit_line("a1b2c3d a1b2c3d4e5f6").build();

    let status = fx.run("");

    assert_eq!(status, ExitStatus::MalformedOutput);
    assert_eq!(status.code(), -2);
    assert_eq!(fx.output(), None);
    assert_eq!(fx.git.calls(), ["head_commit"]);
}

#[test]
fn it_passes_on_the_git_exit_code() {
    let fx = Fixture::builder().commit_exit_code(128).build();

    assert_eq!(fx.run(""), ExitStatus::Git(128));
    assert_eq!(fx.output(), None);

    let fx = Fixture::builder().branch_exit_code(129).build();
    assert_eq!(fx.run(""), ExitStatus::Git(129));
    assert_eq!(fx.output(), None);
}

#[test]
fn it_leaves_an_identical_file_untouched() {
    let fx = Fixture::builder().build();
    assert_eq!(fx.run("line-ending=crlf"), ExitStatus::Success);
    let before = fs::metadata(fx.output_path()).unwrap().modified().unwrap();

    thread::sleep(Duration::from_millis(20));
    assert_eq!(fx.run("line-ending=crlf"), ExitStatus::Success);

    let after = fs::metadata(fx.output_path()).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn it_rewrites_when_options_change() {
    let fx = Fixture::builder().build();
    assert_eq!(fx.run(""), ExitStatus::Success);
    assert!(!fx.output().unwrap().contains('\t'));

    assert_eq!(fx.run("indent=tabs indent-size=1"), ExitStatus::Success);
    assert!(fx.output().unwrap().contains("\n\tpublic string BranchName\n"));
}

#[test]
fn it_disables_indentation_with_zero_size() {
    let fx = Fixture::builder().build();

    assert_eq!(fx.run("ns=Foo indent-size=0"), ExitStatus::Success);

    let out = fx.output().unwrap();
    assert!(out.lines().all(|l| !l.starts_with([' ', '\t'])), "{out}");
}

#[test]
fn it_rejects_bad_config_before_asking_git() {
    let fx = Fixture::builder().build();

    for cmd in [
        "class=1st",
        "unknown=1",
        "indent-size=-4",
        "indent-size=18446744073709551615",
        "line-ending=cr",
    ] {
        let status = fx.run(cmd);
        assert_eq!(status, ExitStatus::ConfigValidation, "{cmd}");
        assert_eq!(status.code(), -1);
    }
    assert!(fx.git.calls().is_empty());
    assert_eq!(fx.output(), None);
}

#[test]
fn it_creates_nested_output_directories() {
    let fx = Fixture::builder().branch("release/1.2").build();
    let nested = fx.dir.path().join("gen/src/Stamp.cs");

    let status = fx.run(&format!("output={} class=Stamp", nested.display()));

    assert_eq!(status, ExitStatus::Success);
    let out = fs::read_to_string(nested).unwrap();
    assert!(out.contains("public class Stamp\n"));
    assert!(out.contains("get { return \"release/1.2\"; }"));
}

#[test]
fn it_reports_write_failures() {
    let fx = Fixture::builder().build();
    fs::create_dir(fx.output_path()).unwrap();

    let status = fx.run("");

    assert_eq!(status, ExitStatus::WriteFailed);
    assert_eq!(status.code(), -4);
}
