use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to determine the current working directory: {0}")]
    WorkingDir(#[source] io::Error),
    #[error("failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read existing file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file already held exactly this content and was not touched.
    Unchanged,
    Written,
}

/// Anchors relative paths at the current working directory.
pub fn resolve_output_path(path: &Path) -> Result<PathBuf, WriteError> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }
    let cwd = std::env::current_dir().map_err(WriteError::WorkingDir)?;

    Ok(cwd.join(path))
}

/// Writes `content` to `path` unless the file already contains it byte for byte.
///
/// Missing parent directories are created. The new content goes through a temporary
/// file in the target directory that is renamed over the destination, so a failure
/// never leaves a half written file behind. A symlinked destination is written
/// through and the link stays in place.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, WriteError> {
    let path = follow_symlink(resolve_output_path(path)?)?;
    let dir = path.parent().unwrap_or(&path);

    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_owned(),
        source,
    })?;

    let existing = match fs::read(&path) {
        Ok(existing) => Some(existing),
        Err(err) if err.kind() == io::ErrorKind::NotFound => None,
        Err(source) => {
            return Err(WriteError::Read {
                path: path.clone(),
                source,
            });
        }
    };
    if existing.as_deref() == Some(content.as_bytes()) {
        debug!(?path, "generated file is up to date");
        return Ok(WriteOutcome::Unchanged);
    }

    replace(&path, dir, content.as_bytes())
        .map_err(|source| WriteError::Write { path: path.clone(), source })?;
    debug!(?path, "wrote generated file");

    Ok(WriteOutcome::Written)
}

/// Returns the file a symlink at `path` points to, or `path` itself.
fn follow_symlink(path: PathBuf) -> Result<PathBuf, WriteError> {
    let is_symlink = fs::symlink_metadata(&path)
        .is_ok_and(|metadata| metadata.file_type().is_symlink());
    if !is_symlink {
        return Ok(path);
    }

    let target = match fs::canonicalize(&path) {
        Ok(target) => target,
        // Dangling, the write creates the target.
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let target = fs::read_link(&path)
                .map_err(|source| WriteError::Read { path: path.clone(), source })?;
            path.parent().unwrap_or(&path).join(target)
        }
        Err(source) => return Err(WriteError::Read { path, source }),
    };
    debug!(link = ?path, ?target, "writing through symlink");

    Ok(target)
}

fn replace(path: &Path, dir: &Path, content: &[u8]) -> io::Result<()> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".git-commit-info").suffix(".tmp");
    #[cfg(unix)]
    builder.permissions(staged_permissions(path));

    let mut tmp = builder.tempfile_in(dir)?;
    debug!(tmp = ?tmp.path(), "staging generated file");
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;

    Ok(())
}

/// Temporary files are private, the result keeps the mode of the file it replaces.
#[cfg(unix)]
fn staged_permissions(path: &Path) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt as _;

    fs::metadata(path)
        .map(|metadata| metadata.permissions())
        .unwrap_or_else(|_| fs::Permissions::from_mode(0o644))
}
