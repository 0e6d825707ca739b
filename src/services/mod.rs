//! Services for fetching, formatting and delivering cost reports

pub mod config;
pub mod cost_explorer;
pub mod formatter;
pub mod mailer;
pub mod period;
pub mod runner;

pub use config::AppConfig;
pub use cost_explorer::{CostExplorerSource, CostSource};
pub use formatter::{format_currency, ReportFormatter};
pub use mailer::{MailSender, SmtpMailer, StdoutMailer};
pub use period::previous_month;
pub use runner::{ReportRunner, RunSummary};
