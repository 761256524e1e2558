//! Config-driven git commit automation.
//!
//! Fetches a commit count from the Consul KV store, performs that many
//! append-and-commit cycles in the repository named by `HONEYDEW_REPO_DIR`,
//! then pushes the local `master` branch to the remote `main` branch.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use honeydew::config::fetch_run_config;
use honeydew::consul::ConsulKv;
use honeydew::{exit_codes, logging, run};

#[derive(Parser)]
#[command(
    name = "honeydew",
    version,
    about = "Config-driven git commit automation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the commit count and run the commit-and-push pipeline.
    Run {
        /// Suppress commit output and config record logging.
        #[arg(long)]
        quiet: bool,
        /// Fail immediately when the normal push is rejected.
        #[arg(long)]
        no_force_push: bool,
    },
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILURE);
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            quiet,
            no_force_push,
        } => cmd_run(!quiet, !no_force_push),
    }
}

fn cmd_run(verbose: bool, force_push_allowed: bool) -> Result<()> {
    logging::init(verbose);
    ensure_home_defined()?;

    let source = ConsulKv::from_env();
    let config =
        fetch_run_config(&source, verbose, force_push_allowed).context("fetch run config")?;
    let summary = run::run(&config).context("honeydew run")?;

    tracing::info!(
        commits = summary.commits,
        forced_push = summary.forced_push,
        "done"
    );
    Ok(())
}

/// `HOME` must be present; nothing beyond presence is used.
fn ensure_home_defined() -> Result<()> {
    let home = std::env::var("HOME").unwrap_or_default();
    if home.trim().is_empty() {
        return Err(anyhow!("env HOME is not defined"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::parse_from(["honeydew", "run"]);
        assert!(matches!(
            cli.command,
            Command::Run {
                quiet: false,
                no_force_push: false
            }
        ));
    }

    #[test]
    fn parse_run_flags() {
        let cli = Cli::parse_from(["honeydew", "run", "--quiet", "--no-force-push"]);
        assert!(matches!(
            cli.command,
            Command::Run {
                quiet: true,
                no_force_push: true
            }
        ));
    }
}
