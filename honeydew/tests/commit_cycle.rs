//! End-to-end tests for the commit-and-push pipeline.
//!
//! Each test builds a disposable work repository with a bare `origin`
//! remote in a tempdir, so every push is a real git push and no network
//! is involved. The repository starts with one seed commit on `master`.

use honeydew::config::RunConfig;
use honeydew::error::Error;
use honeydew::io::tracked_file::{TRACKED_FILE_NAME, TRACKED_LINE};
use honeydew::run::{RunSummary, execute};
use honeydew::test_support::{TestRepo, git_capture};

fn config(commit_count: u32, force_push_allowed: bool) -> RunConfig {
    RunConfig {
        commit_count,
        verbose: false,
        force_push_allowed,
    }
}

#[test]
fn three_cycles_append_commit_and_push() {
    let repo = TestRepo::new().expect("repo");

    let summary = execute(&config(3, true), repo.work()).expect("run");

    assert_eq!(
        summary,
        RunSummary {
            commits: 3,
            forced_push: false
        }
    );
    let contents =
        std::fs::read_to_string(repo.work().join(TRACKED_FILE_NAME)).expect("read tracked file");
    assert_eq!(contents, TRACKED_LINE.repeat(3));
    // seed + 3 cycles, locally and on the remote `main`.
    assert_eq!(repo.work_commit_count().expect("count"), 4);
    assert_eq!(repo.remote_commit_count("main").expect("count"), 4);
}

#[test]
fn cycle_commits_use_the_fixed_message() {
    let repo = TestRepo::new().expect("repo");

    execute(&config(1, true), repo.work()).expect("run");

    let message = git_capture(repo.work(), &["log", "-1", "--pretty=%s"]).expect("log");
    assert_eq!(message, "regular");
}

#[test]
fn zero_count_appends_nothing_and_pushes_once() {
    let repo = TestRepo::new().expect("repo");

    let summary = execute(&config(0, true), repo.work()).expect("run");

    assert!(!summary.forced_push);
    // The tracked file is still opened (and created), but nothing is appended
    // and no cycle commit is made; the push publishes only the seed commit.
    let contents =
        std::fs::read_to_string(repo.work().join(TRACKED_FILE_NAME)).expect("read tracked file");
    assert_eq!(contents, "");
    assert_eq!(repo.work_commit_count().expect("count"), 1);
    assert_eq!(repo.remote_commit_count("main").expect("count"), 1);
}

#[test]
fn rejected_push_retries_with_force_when_allowed() {
    let repo = TestRepo::new().expect("repo");
    repo.seed_divergent_remote_main().expect("seed remote");

    let summary = execute(&config(1, true), repo.work()).expect("run");

    assert!(summary.forced_push);
    // The forced push replaced the divergent history with seed + 1 cycle.
    assert_eq!(repo.remote_commit_count("main").expect("count"), 2);
}

#[test]
fn rejected_push_propagates_when_force_disallowed() {
    let repo = TestRepo::new().expect("repo");
    repo.seed_divergent_remote_main().expect("seed remote");

    let err = execute(&config(1, false), repo.work()).unwrap_err();

    assert!(matches!(err, Error::PushError(_)));
    // No forced retry: the divergent remote history is untouched.
    assert_eq!(repo.remote_commit_count("main").expect("count"), 1);
}

#[test]
fn unreachable_remote_fails_the_forced_retry() {
    let repo = TestRepo::new().expect("repo");
    repo.break_remote().expect("break remote");

    let err = execute(&config(0, true), repo.work()).unwrap_err();

    assert!(matches!(err, Error::ForcePushError(_)));
}

#[test]
fn failing_commit_aborts_remaining_cycles_and_push() {
    let repo = TestRepo::new().expect("repo");
    repo.install_failing_precommit().expect("hook");

    let err = execute(&config(3, true), repo.work()).unwrap_err();

    assert!(matches!(err, Error::CommitError(_)));
    // Exactly one append happened before the first commit attempt failed;
    // cycles 2..3 and the push never ran.
    let contents =
        std::fs::read_to_string(repo.work().join(TRACKED_FILE_NAME)).expect("read tracked file");
    assert_eq!(contents, TRACKED_LINE);
    assert_eq!(repo.work_commit_count().expect("count"), 1);
    assert_eq!(repo.remote_commit_count("main").expect("count"), 0);
}
