//! Configuration loader
//!
//! Reads the TOML config once at startup (default `~/.cost-report/config.toml`)
//! and validates it. AWS keys are not stored in the file: each account names
//! the environment variables that hold them.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use lettre::message::Mailbox;
use serde::Deserialize;

use crate::types::{Account, AwsCredentials, ReportError, Result, SmtpSettings};

/// Default SMTP relay port
const DEFAULT_SMTP_PORT: u16 = 25;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    smtp: RawSmtp,
    #[serde(default)]
    accounts: Vec<RawAccount>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSmtp {
    host: String,
    #[serde(default = "default_smtp_port")]
    port: u16,
    sender: String,
    #[serde(default)]
    recipients: Vec<String>,
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAccount {
    name: String,
    account_id: String,
    region: String,
    access_key_env: String,
    secret_key_env: String,
}

/// Validated run configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub smtp: SmtpSettings,
    pub accounts: Vec<Account>,
}

impl AppConfig {
    /// Default config location (`~/.cost-report/config.toml`)
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| ReportError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".cost-report").join("config.toml"))
    }

    /// Load from `path`, resolving credentials from the process environment
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content, |key| std::env::var(key).ok())
    }

    /// Parse and validate config text; `env` looks up credential variables
    pub fn from_toml_str<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| ReportError::Config(format!("Invalid config format: {}", e)))?;

        let smtp = validate_smtp(raw.smtp)?;

        if raw.accounts.is_empty() {
            return Err(ReportError::Config("No accounts configured".into()));
        }

        let accounts = raw
            .accounts
            .into_iter()
            .enumerate()
            .map(|(i, account)| validate_account(i, account, &env))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { smtp, accounts })
    }
}

fn require(value: String, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ReportError::Config(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

fn parse_mailbox(value: &str, what: &str) -> Result<Mailbox> {
    value
        .parse()
        .map_err(|e| ReportError::Config(format!("Invalid {} {:?}: {}", what, value, e)))
}

fn validate_smtp(raw: RawSmtp) -> Result<SmtpSettings> {
    let host = require(raw.host, "smtp.host")?;
    let sender = parse_mailbox(&raw.sender, "smtp.sender")?;

    if raw.recipients.is_empty() {
        return Err(ReportError::Config("smtp.recipients must not be empty".into()));
    }
    let recipients = raw
        .recipients
        .iter()
        .map(|r| parse_mailbox(r, "smtp.recipients entry"))
        .collect::<Result<Vec<_>>>()?;

    Ok(SmtpSettings {
        host,
        port: raw.port,
        sender,
        recipients,
    })
}

fn validate_account<F>(index: usize, raw: RawAccount, env: &F) -> Result<Account>
where
    F: Fn(&str) -> Option<String>,
{
    let field = |name: &str| format!("accounts[{}].{}", index, name);

    let name = require(raw.name, &field("name"))?;
    let account_id = require(raw.account_id, &field("account_id"))?;
    let region = require(raw.region, &field("region"))?;
    let access_key_env = require(raw.access_key_env, &field("access_key_env"))?;
    let secret_key_env = require(raw.secret_key_env, &field("secret_key_env"))?;

    // Absent keys are not a config error; the runner skips such accounts
    let lookup = |key: &str| env(key).filter(|v| !v.is_empty());
    let credentials = match (lookup(&access_key_env), lookup(&secret_key_env)) {
        (Some(access_key), Some(secret_key)) => Some(AwsCredentials {
            access_key,
            secret_key,
        }),
        _ => None,
    };

    Ok(Account {
        name,
        account_id,
        region,
        credentials,
    })
}
