//! Test-only helpers for building disposable git repositories.
//!
//! [`TestRepo`] creates a work repository on branch `master` with a bare
//! `origin` remote in the same tempdir, so pushes in tests are real git
//! pushes with no network involved.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

/// Disposable work repository on branch `master` with a bare `origin` remote.
pub struct TestRepo {
    tempdir: TempDir,
    work: PathBuf,
    remote: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let tempdir = tempfile::tempdir().context("tempdir")?;
        let work = tempdir.path().join("work");
        let remote = tempdir.path().join("remote.git");
        std::fs::create_dir_all(&work).context("create work dir")?;
        std::fs::create_dir_all(&remote).context("create remote dir")?;

        git(&remote, &["init", "--bare"])?;
        init_work_repo(&work)?;
        let remote_url = remote.display().to_string();
        git(&work, &["remote", "add", "origin", &remote_url])?;

        // Seed commit so HEAD exists before the first cycle.
        std::fs::write(work.join("README.md"), "seed\n").context("write seed")?;
        git(&work, &["add", "README.md"])?;
        git(&work, &["commit", "-m", "seed"])?;

        Ok(Self {
            tempdir,
            work,
            remote,
        })
    }

    pub fn work(&self) -> &Path {
        &self.work
    }

    pub fn remote(&self) -> &Path {
        &self.remote
    }

    /// Commit count on a branch of the bare remote; 0 if the branch is absent.
    pub fn remote_commit_count(&self, branch: &str) -> Result<u32> {
        commit_count(&self.remote, branch)
    }

    /// Commit count on HEAD of the work repository.
    pub fn work_commit_count(&self) -> Result<u32> {
        commit_count(&self.work, "HEAD")
    }

    /// Publish an unrelated one-commit history as the remote `main`, so a
    /// normal push from the work repository is rejected as non-fast-forward.
    pub fn seed_divergent_remote_main(&self) -> Result<()> {
        let other = self.tempdir.path().join("divergent");
        std::fs::create_dir_all(&other).context("create divergent dir")?;
        init_work_repo(&other)?;
        std::fs::write(other.join("OTHER.md"), "divergent\n").context("write divergent")?;
        git(&other, &["add", "OTHER.md"])?;
        git(&other, &["commit", "-m", "divergent"])?;
        let remote_url = self.remote.display().to_string();
        git(&other, &["remote", "add", "origin", &remote_url])?;
        git(&other, &["push", "origin", "master:main"])?;
        Ok(())
    }

    /// Point `origin` at a path that does not exist, so every push fails.
    pub fn break_remote(&self) -> Result<()> {
        let bogus = self.tempdir.path().join("no-such-remote.git");
        let bogus_url = bogus.display().to_string();
        git(&self.work, &["remote", "set-url", "origin", &bogus_url])
    }

    /// Install a pre-commit hook that rejects every commit.
    pub fn install_failing_precommit(&self) -> Result<()> {
        let hooks = self.work.join(".git").join("hooks");
        std::fs::create_dir_all(&hooks).context("create hooks dir")?;
        let hook = hooks.join("pre-commit");
        std::fs::write(&hook, "#!/bin/sh\nexit 1\n").context("write pre-commit hook")?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755))
                .context("chmod pre-commit hook")?;
        }
        Ok(())
    }
}

fn init_work_repo(dir: &Path) -> Result<()> {
    git(dir, &["init", "-b", "master"])?;
    git(dir, &["config", "user.name", "honeydew-test"])?;
    git(dir, &["config", "user.email", "honeydew-test@example.invalid"])?;
    Ok(())
}

fn commit_count(dir: &Path, rev: &str) -> Result<u32> {
    let out = Command::new("git")
        .args(["rev-list", "--count", rev])
        .current_dir(dir)
        .output()
        .context("git rev-list")?;
    if !out.status.success() {
        // Absent branch (e.g. nothing pushed yet).
        return Ok(0);
    }
    String::from_utf8_lossy(&out.stdout)
        .trim()
        .parse()
        .context("parse rev-list count")
}

/// Run a git command in `dir`, failing on nonzero exit.
pub fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !out.status.success() {
        return Err(anyhow!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&out.stderr).trim()
        ));
    }
    Ok(())
}

/// Run a git command in `dir` and return trimmed stdout.
pub fn git_capture(dir: &Path, args: &[&str]) -> Result<String> {
    let out = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("spawn git {}", args.join(" ")))?;
    if !out.status.success() {
        return Err(anyhow!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&out.stderr).trim()
        ));
    }
    Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
}
