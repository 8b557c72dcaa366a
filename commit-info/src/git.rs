use std::{
    ffi::OsString,
    io,
    process::{Command, Stdio},
};

use thiserror::Error;
use tracing::debug;

/// Arguments for the single line `<short hash> <long hash> <committer date>`.
pub const HEAD_COMMIT_ARGS: [&str; 4] = ["log", "-n", "1", "--pretty=format:%h %H %ci"];
/// Arguments for the name of the checked out branch.
pub const HEAD_BRANCH_ARGS: [&str; 3] = ["rev-parse", "--abbrev-ref", "HEAD"];

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run `git {command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`git {command}` failed and returned exit code {code}")]
    Failed { command: String, code: i32 },
    #[error("`git {command}` was terminated by a signal")]
    Terminated { command: String },
}

/// The two questions we ask the repository in the current working directory.
///
/// Implementations return the raw standard output of the query.
pub trait Git {
    /// Output of `git log -n 1 --pretty=format:"%h %H %ci"`.
    fn head_commit(&self) -> Result<String, GitError>;

    /// Output of `git rev-parse --abbrev-ref HEAD`.
    fn head_branch(&self) -> Result<String, GitError>;
}

/// Runs the real git executable.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: OsString,
}

impl SystemGit {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        debug!(program = ?self.program, %command, "running git");

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(match output.status.code() {
                Some(code) => GitError::Failed { command, code },
                None => GitError::Terminated { command },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Git for SystemGit {
    fn head_commit(&self) -> Result<String, GitError> {
        self.run(&HEAD_COMMIT_ARGS)
    }

    fn head_branch(&self) -> Result<String, GitError> {
        self.run(&HEAD_BRANCH_ARGS)
    }
}
