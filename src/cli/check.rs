//! `cost-report check`: config validation without touching AWS or SMTP

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::resolve_config_path;
use crate::services::AppConfig;
use crate::types::{ReportError, Result};

/// Validate the config file
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Config file [default: ~/.cost-report/config.toml]
    #[arg(long, env = "COST_REPORT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct AccountStatus<'a> {
    name: &'a str,
    account_id: &'a str,
    region: &'a str,
    credentials_found: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    smtp_relay: String,
    sender: String,
    recipients: Vec<String>,
    accounts: Vec<AccountStatus<'a>>,
}

impl<'a> CheckReport<'a> {
    fn new(config: &'a AppConfig) -> Self {
        Self {
            smtp_relay: format!("{}:{}", config.smtp.host, config.smtp.port),
            sender: config.smtp.sender.to_string(),
            recipients: config.smtp.recipients.iter().map(|r| r.to_string()).collect(),
            accounts: config
                .accounts
                .iter()
                .map(|a| AccountStatus {
                    name: &a.name,
                    account_id: &a.account_id,
                    region: &a.region,
                    credentials_found: a.credentials.is_some(),
                })
                .collect(),
        }
    }

    fn to_text(&self) -> String {
        let mut lines = vec![
            format!("SMTP relay: {}", self.smtp_relay),
            format!("Sender:     {}", self.sender),
            format!("Recipients: {}", self.recipients.join(", ")),
            String::new(),
        ];
        for account in &self.accounts {
            lines.push(format!(
                "{:<20} {:<14} {:<16} {}",
                account.name,
                account.account_id,
                account.region,
                if account.credentials_found {
                    "credentials ok"
                } else {
                    "MISSING CREDENTIALS"
                }
            ));
        }
        lines.join("\n")
    }
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let path = resolve_config_path(self.config)?;
        let config = AppConfig::load(&path)?;
        let report = CheckReport::new(&config);

        if self.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| ReportError::Parse(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", report.to_text());
        }
        Ok(())
    }
}
