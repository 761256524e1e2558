//! Append-or-create handle for the tracked text file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Name of the file mutated on every cycle.
pub const TRACKED_FILE_NAME: &str = "hello.txt";

/// Line appended once per cycle.
pub const TRACKED_LINE: &str = "random word\n";

/// Exclusive handle to the tracked file, held for the whole run.
///
/// Dropping the handle closes it silently; call [`TrackedFile::close`] to
/// surface flush/close failures instead.
#[derive(Debug)]
pub struct TrackedFile {
    file: File,
    path: PathBuf,
}

impl TrackedFile {
    /// Open `hello.txt` inside `repo_dir` for appending, creating it if missing.
    pub fn open(repo_dir: &Path) -> Result<Self> {
        let path = repo_dir.join(TRACKED_FILE_NAME);
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|source| Error::FileOpenError {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "tracked file open");
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the fixed line for one cycle.
    pub fn append_line(&mut self) -> Result<()> {
        self.file
            .write_all(TRACKED_LINE.as_bytes())
            .map_err(|source| Error::WriteError {
                path: self.path.clone(),
                source,
            })
    }

    /// Flush to disk and release the handle, surfacing failures.
    pub fn close(self) -> Result<()> {
        self.file.sync_all().map_err(|source| Error::CloseError {
            path: self.path.clone(),
            source,
        })
    }
}
