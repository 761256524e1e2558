//! Run parameters and the config-store fetch.
//!
//! The [`ConfigSource`] trait decouples run-config resolution from the
//! actual key-value backend (currently Consul). Tests use scripted sources
//! that return predetermined values without any network I/O.

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Key under which the commit count lives in the config store.
pub const CONFIG_KEY: &str = "config/honeydew";

/// Immutable parameters for one run.
///
/// Created once at startup and passed explicitly down the call chain;
/// never stored in a global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of append-and-commit cycles to perform.
    pub commit_count: u32,
    /// Mirror commit stdout and log the fetched config record.
    pub verbose: bool,
    /// Retry a rejected push with `--force`.
    pub force_push_allowed: bool,
}

/// Record stored at [`CONFIG_KEY`].
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ConfigRecord {
    pub num: i64,
}

/// Source of raw config values, keyed by path.
pub trait ConfigSource {
    /// Fetch the raw stored value for `key`.
    fn fetch_raw(&self, key: &str) -> Result<String>;
}

/// Fetch and parse the commit count, combining it with the CLI-owned flags.
pub fn fetch_run_config<S: ConfigSource>(
    source: &S,
    verbose: bool,
    force_push_allowed: bool,
) -> Result<RunConfig> {
    let raw = source.fetch_raw(CONFIG_KEY)?;
    let record = parse_record(CONFIG_KEY, &raw)?;
    if verbose {
        info!(num = record.num, key = CONFIG_KEY, "fetched config record");
    }
    let commit_count = u32::try_from(record.num).map_err(|_| Error::ConfigMalformed {
        key: CONFIG_KEY.to_string(),
        reason: format!("num must be a non-negative integer, got {}", record.num),
    })?;
    debug!(commit_count, verbose, force_push_allowed, "run config resolved");
    Ok(RunConfig {
        commit_count,
        verbose,
        force_push_allowed,
    })
}

fn parse_record(key: &str, raw: &str) -> Result<ConfigRecord> {
    serde_json::from_str(raw).map_err(|err| Error::ConfigMalformed {
        key: key.to_string(),
        reason: err.to_string(),
    })
}
