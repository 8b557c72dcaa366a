use thiserror::Error;
use tracing::debug;

use crate::git::Git;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("git log failed to provide required information, expected `<short hash> <long hash> <committer date>` but got {line:?}")]
pub struct ParseError {
    line: String,
}

/// The three fields of the commit metadata line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitLine<'a> {
    pub short_hash: &'a str,
    pub long_hash: &'a str,
    pub committer_date: &'a str,
}

impl<'a> CommitLine<'a> {
    /// Splits on the first two spaces. The committer date keeps its own spaces.
    pub fn parse(line: &'a str) -> Result<Self, ParseError> {
        let mut parts = line.splitn(3, ' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(short_hash), Some(long_hash), Some(committer_date)) => Ok(Self {
                short_hash,
                long_hash,
                committer_date,
            }),
            _ => Err(ParseError {
                line: line.to_owned(),
            }),
        }
    }
}

/// What the generated file exposes. Values are passed through as git printed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub short_hash: String,
    pub long_hash: String,
    pub committer_date: String,
    pub branch_name: String,
}

impl CommitRecord {
    /// Asks `git` for the commit line, parses it, and only then asks for the branch.
    pub fn query(git: &impl Git) -> crate::Result<Self> {
        let output = git.head_commit()?;
        let line = CommitLine::parse(&output)?;
        debug!(?line, "parsed head commit");

        let branch_name = git.head_branch()?.trim().to_owned();

        Ok(Self {
            short_hash: line.short_hash.to_owned(),
            long_hash: line.long_hash.to_owned(),
            committer_date: line.committer_date.to_owned(),
            branch_name,
        })
    }
}
