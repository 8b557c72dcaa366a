//! Stamps the checked out git commit into a generated C# source file.
//!
//! A run asks [`git::Git`] for the head commit and branch, renders them with
//! [`render::render`] and hands the text to [`writer::write_if_changed`].

#![allow(clippy::missing_errors_doc)]

use tracing::debug;

pub mod exit_code;
pub mod git;
pub mod options;
pub mod program;
pub mod record;
pub mod render;
pub mod test_utils;
pub mod writer;

pub use crate::{
    exit_code::ExitStatus,
    git::{Git, SystemGit},
    options::Options,
    record::CommitRecord,
    writer::WriteOutcome,
};

/// Error definition for library.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Git(#[from] git::GitError),
    #[error(transparent)]
    MalformedOutput(#[from] record::ParseError),
    #[error(transparent)]
    Write(#[from] writer::WriteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Queries the repository, renders the file and writes it if it changed.
pub fn generate(git: &impl Git, options: &Options) -> Result<WriteOutcome> {
    let record = CommitRecord::query(git)?;
    debug!(?record, "queried repository");

    let content = render::render(options, &record);

    Ok(writer::write_if_changed(&options.output_filename, &content)?)
}
