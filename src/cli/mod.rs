use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod check;
mod run;

pub use check::CheckArgs;
pub use run::RunArgs;

use crate::services::AppConfig;
use crate::types::Result;

/// Monthly AWS cost report mailer
#[derive(Parser)]
#[command(name = "cost-report")]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    default_run: RunArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, format and mail last month's reports (default)
    Run(RunArgs),

    /// Validate the config file and show which accounts have credentials
    Check(CheckArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => self.default_run.run()?,
            Some(Commands::Run(args)) => args.run()?,
            Some(Commands::Check(args)) => args.run()?,
        }
        Ok(())
    }
}

/// Explicit path (flag or `COST_REPORT_CONFIG`) or the default location
fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => AppConfig::default_path(),
    }
}
