use std::process::{ExitCode, Termination};

use crate::{Error, git::GitError};

/// Exit statuses of the tool. When git itself fails, its exit code is passed on so
/// callers can tell "not a repository" apart from other problems.
///
/// The process status is the low byte of [`ExitStatus::code`], so `-1` shows up as
/// `255` on unix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    ConfigValidation,
    MalformedOutput,
    GitUnavailable,
    WriteFailed,
    Git(i32),
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::ConfigValidation => -1,
            ExitStatus::MalformedOutput => -2,
            ExitStatus::GitUnavailable => -3,
            ExitStatus::WriteFailed => -4,
            ExitStatus::Git(code) => code,
        }
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        // Truncation matches what the OS does with `exit(-1)`.
        ExitCode::from(self.code() as u8)
    }
}

impl From<&Error> for ExitStatus {
    fn from(err: &Error) -> Self {
        match err {
            Error::Git(GitError::Failed { code, .. }) => ExitStatus::Git(*code),
            Error::Git(GitError::Spawn { .. } | GitError::Terminated { .. }) => {
                ExitStatus::GitUnavailable
            }
            Error::MalformedOutput(_) => ExitStatus::MalformedOutput,
            Error::Write(_) => ExitStatus::WriteFailed,
        }
    }
}
