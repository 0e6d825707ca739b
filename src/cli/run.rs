//! `cost-report run`: the monthly report job

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use tracing::info;

use super::resolve_config_path;
use crate::services::{
    previous_month, AppConfig, CostExplorerSource, ReportRunner, SmtpMailer, StdoutMailer,
};
use crate::types::Result;

/// Generate and send last month's reports
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Config file [default: ~/.cost-report/config.toml]
    #[arg(long, env = "COST_REPORT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report on the month before this date instead of today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Print reports to stdout instead of emailing them
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let path = resolve_config_path(self.config)?;
        let config = AppConfig::load(&path)?;
        info!(
            "Loaded {} account(s) from {}",
            config.accounts.len(),
            path.display()
        );

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let range = previous_month(today);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        runtime.block_on(async {
            if self.dry_run {
                ReportRunner::new(CostExplorerSource, StdoutMailer)
                    .run(&config.accounts, &range)
                    .await
            } else {
                ReportRunner::new(CostExplorerSource, SmtpMailer::new(config.smtp.clone()))
                    .run(&config.accounts, &range)
                    .await
            }
        })?;

        Ok(())
    }
}
