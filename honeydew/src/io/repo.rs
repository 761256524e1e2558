//! Repository location and validation.
//!
//! The repository path comes from `HONEYDEW_REPO_DIR`. Validation is strict:
//! the variable must be non-blank, the path must exist, and it must be a
//! directory. On success the process working directory moves into the
//! repository, preserving the original tool's behavior.

use std::path::{Path, PathBuf};
use std::{env, fs};

use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the repository directory.
pub const REPO_DIR_VAR: &str = "HONEYDEW_REPO_DIR";

/// Resolve `HONEYDEW_REPO_DIR`, validate it, and chdir into it.
pub fn locate_repo() -> Result<PathBuf> {
    let path = repo_dir_from(env::var(REPO_DIR_VAR).ok())?;
    validate_repo_dir(&path)?;
    env::set_current_dir(&path).map_err(|source| Error::PathError {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "repository located");
    Ok(path)
}

/// Trim the raw variable value; blank or absent is a missing config.
fn repo_dir_from(raw: Option<String>) -> Result<PathBuf> {
    let trimmed = raw.as_deref().unwrap_or_default().trim().to_string();
    if trimmed.is_empty() {
        return Err(Error::MissingConfig(REPO_DIR_VAR));
    }
    Ok(PathBuf::from(trimmed))
}

/// Stat `path` and require an existing directory.
pub fn validate_repo_dir(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(Error::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Err(Error::PathNotFound {
            path: path.to_path_buf(),
            source,
        }),
        Err(source) => Err(Error::PathError {
            path: path.to_path_buf(),
            source,
        }),
    }
}
