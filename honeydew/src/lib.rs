//! Config-driven git commit automation.
//!
//! honeydew reads a commit count from a Consul KV record, performs that many
//! trivial append-and-commit cycles in a local repository, then pushes the
//! local `master` branch to the remote `main` branch. The crate separates:
//!
//! - [`config`] / [`consul`]: run parameters and the config-store client.
//!   The [`config::ConfigSource`] trait is the seam tests substitute.
//! - [`io`]: side-effecting operations (environment, filesystem, git
//!   subprocesses).
//! - [`run`]: orchestration of the fetch → commit → push pipeline.

pub mod config;
pub mod consul;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
