//! Orchestration of the fetch → commit → push pipeline.
//!
//! One run: open the tracked file, perform `commit_count` append-stage-commit
//! cycles, push `master` to the remote `main`, close the tracked file. The
//! first failing cycle aborts the rest of the loop and the push.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::config::RunConfig;
use crate::error::Result;
use crate::io::git::{COMMIT_MESSAGE, Git, PUSH_REFSPEC};
use crate::io::repo::locate_repo;
use crate::io::tracked_file::TrackedFile;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles performed (always `commit_count` on success).
    pub commits: u32,
    /// True when the push only succeeded on the forced retry.
    pub forced_push: bool,
}

/// Locate the repository from the environment, then execute the pipeline in it.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let repo_dir = locate_repo()?;
    execute(config, &repo_dir)
}

/// Execute `commit_count` append-stage-commit cycles in `repo_dir`, then push.
#[instrument(skip_all, fields(commit_count = config.commit_count))]
pub fn execute(config: &RunConfig, repo_dir: &Path) -> Result<RunSummary> {
    let git = Git::new(repo_dir);
    let mut tracked = TrackedFile::open(repo_dir)?;

    let outcome = commit_cycles(config, &git, &mut tracked).and_then(|()| push(config, &git));

    // Release the handle even when a cycle failed; the pipeline error wins,
    // but a close failure on the success path is itself fatal.
    let closed = tracked.close();
    let forced_push = outcome?;
    closed?;

    info!(commits = config.commit_count, forced_push, "run complete");
    Ok(RunSummary {
        commits: config.commit_count,
        forced_push,
    })
}

fn commit_cycles(config: &RunConfig, git: &Git, tracked: &mut TrackedFile) -> Result<()> {
    for cycle in 0..config.commit_count {
        debug!(cycle, "commit cycle");
        tracked.append_line()?;
        git.add(tracked.path())?;
        git.commit(COMMIT_MESSAGE, config.verbose)?;
    }
    Ok(())
}

/// Push once; on rejection, retry with `--force` when allowed.
fn push(config: &RunConfig, git: &Git) -> Result<bool> {
    match git.push(PUSH_REFSPEC, false) {
        Ok(()) => Ok(false),
        Err(err) if config.force_push_allowed => {
            warn!(error = %err, "push rejected, retrying with --force");
            git.push(PUSH_REFSPEC, true)?;
            Ok(true)
        }
        Err(err) => Err(err),
    }
}
