//! Git adapter for the commit-and-push pipeline.
//!
//! A small, explicit wrapper around `git` subprocess calls. Commands run
//! with the repository as working directory and stderr inherited, so git
//! diagnostics reach the operator's console live instead of being buffered.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Refspec pushed at the end of every run: local `master` to remote `main`.
pub const PUSH_REFSPEC: &str = "master:main";

/// Commit message used for every cycle.
pub const COMMIT_MESSAGE: &str = "regular";

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Stage one file.
    pub fn add(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "git add");
        let mut cmd = self.command(&["add"]);
        cmd.arg(path);
        let status = cmd.status().map_err(|err| Error::StageError(err.to_string()))?;
        if !status.success() {
            return Err(Error::StageError(status.to_string()));
        }
        Ok(())
    }

    /// Commit staged changes; commit stdout is mirrored only in verbose mode.
    pub fn commit(&self, message: &str, verbose: bool) -> Result<()> {
        debug!(message, "git commit");
        let mut cmd = self.command(&["commit", "-m", message]);
        if verbose {
            cmd.stdout(Stdio::inherit());
        }
        let status = cmd.status().map_err(|err| Error::CommitError(err.to_string()))?;
        if !status.success() {
            return Err(Error::CommitError(status.to_string()));
        }
        Ok(())
    }

    /// Push `refspec` to `origin`, optionally with `--force`.
    pub fn push(&self, refspec: &str, forced: bool) -> Result<()> {
        debug!(refspec, forced, "git push");
        let mut cmd = if forced {
            self.command(&["push", "--force", "origin", refspec])
        } else {
            self.command(&["push", "origin", refspec])
        };
        let map_err = |detail: String| {
            if forced {
                Error::ForcePushError(detail)
            } else {
                Error::PushError(detail)
            }
        };
        let status = cmd.status().map_err(|err| map_err(err.to_string()))?;
        if !status.success() {
            return Err(map_err(status.to_string()));
        }
        Ok(())
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args)
            .current_dir(&self.workdir)
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TestRepo, git_capture};

    #[test]
    fn add_and_commit_record_one_commit() {
        let repo = TestRepo::new().expect("repo");
        let git = Git::new(repo.work());
        let file = repo.work().join("note.txt");
        std::fs::write(&file, "hi\n").expect("write");

        git.add(&file).expect("add");
        git.commit(COMMIT_MESSAGE, false).expect("commit");

        let message = git_capture(repo.work(), &["log", "-1", "--pretty=%s"]).expect("log");
        assert_eq!(message, COMMIT_MESSAGE);
    }

    #[test]
    fn add_of_missing_file_is_stage_error() {
        let repo = TestRepo::new().expect("repo");
        let git = Git::new(repo.work());
        let err = git.add(&repo.work().join("absent.txt")).unwrap_err();
        assert!(matches!(err, Error::StageError(_)));
    }

    #[test]
    fn commit_with_nothing_staged_is_commit_error() {
        let repo = TestRepo::new().expect("repo");
        let git = Git::new(repo.work());
        let err = git.commit(COMMIT_MESSAGE, false).unwrap_err();
        assert!(matches!(err, Error::CommitError(_)));
    }

    #[test]
    fn push_publishes_master_as_main() {
        let repo = TestRepo::new().expect("repo");
        let git = Git::new(repo.work());
        git.push(PUSH_REFSPEC, false).expect("push");
        assert_eq!(repo.remote_commit_count("main").expect("count"), 1);
    }
}
