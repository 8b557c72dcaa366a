use std::{cell::RefCell, ffi::OsString, fs, path::PathBuf};

use bon::bon;
use tempfile::TempDir;

use crate::{
    ExitStatus,
    git::{Git, GitError, HEAD_BRANCH_ARGS, HEAD_COMMIT_ARGS},
    program,
};

/// What `git log -n 1 --pretty=format:"%h %H %ci"` prints for the fake head commit.
pub const COMMIT_LINE: &str =
    "a1b2c3d a1b2c3d4e5f60718293a4b5c6d7e8f9012345678 2024-01-15 10:00:00 +0000";
pub const OUTPUT_FILENAME: &str = "GitCommitInfo.cs";

#[derive(Debug, Clone)]
enum Reply {
    Stdout(String),
    Exit(i32),
}

impl Reply {
    fn answer(&self, args: &[&str]) -> Result<String, GitError> {
        match self {
            Reply::Stdout(out) => Ok(out.clone()),
            Reply::Exit(code) => Err(GitError::Failed {
                command: args.join(" "),
                code: *code,
            }),
        }
    }
}

/// A [`Git`] that answers with canned output and remembers what it was asked.
#[derive(Debug)]
pub struct FakeGit {
    commit: Reply,
    branch: Reply,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeGit {
    pub fn new(commit_line: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            commit: Reply::Stdout(commit_line.into()),
            branch: Reply::Stdout(branch.into()),
            calls: RefCell::default(),
        }
    }

    pub fn with_commit_exit_code(self, code: i32) -> Self {
        Self {
            commit: Reply::Exit(code),
            ..self
        }
    }

    pub fn with_branch_exit_code(self, code: i32) -> Self {
        Self {
            branch: Reply::Exit(code),
            ..self
        }
    }

    /// The queries made so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl Git for FakeGit {
    fn head_commit(&self) -> Result<String, GitError> {
        self.calls.borrow_mut().push("head_commit");
        self.commit.answer(&HEAD_COMMIT_ARGS)
    }

    fn head_branch(&self) -> Result<String, GitError> {
        self.calls.borrow_mut().push("head_branch");
        self.branch.answer(&HEAD_BRANCH_ARGS)
    }
}

/// A Fixture that runs the tool against a [`FakeGit`] and a temporary output dir.
pub struct Fixture {
    pub dir: TempDir,
    pub git: FakeGit,
}

#[bon]
impl Fixture {
    #[builder]
    pub fn new(
        #[builder(into, default = COMMIT_LINE.to_owned())] commit_line: String,
        #[builder(into, default = "main".to_owned())] branch: String,
        commit_exit_code: Option<i32>,
        branch_exit_code: Option<i32>,
    ) -> Fixture {
        let mut git = FakeGit::new(commit_line, branch);
        if let Some(code) = commit_exit_code {
            git = git.with_commit_exit_code(code);
        }
        if let Some(code) = branch_exit_code {
            git = git.with_branch_exit_code(code);
        }

        Self {
            dir: TempDir::new().unwrap(),
            git,
        }
    }

    /// Where the tool writes unless `cmd` overrides `output`.
    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(OUTPUT_FILENAME)
    }

    pub fn output(&self) -> Option<String> {
        fs::read_to_string(self.output_path()).ok()
    }

    /// Runs the tool with the space separated `cmd` as arguments.
    pub fn run(&self, cmd: &str) -> ExitStatus {
        let mut args: Vec<OsString> = vec![
            "git-commit-info".into(),
            "--output".into(),
            self.output_path().into(),
        ];
        args.extend(cmd.split_whitespace().map(OsString::from));

        program::main_with(&self.git, args)
    }
}
