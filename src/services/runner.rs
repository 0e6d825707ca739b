//! Report runner: fetch → format → send for each account, in order
//!
//! Per-account fetch and parse failures are logged and skipped. A mail
//! failure aborts the run and is returned to the caller.

use tracing::{debug, error, info};

use super::cost_explorer::CostSource;
use super::formatter::ReportFormatter;
use super::mailer::MailSender;
use crate::types::{Account, DateRange, Result};

/// Outcome counts for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Near-zero line items left out of sent reports
    pub hidden: usize,
}

/// Drives report generation over a fixed account list
pub struct ReportRunner<S, M> {
    source: S,
    mailer: M,
}

impl<S: CostSource, M: MailSender> ReportRunner<S, M> {
    pub fn new(source: S, mailer: M) -> Self {
        Self { source, mailer }
    }

    /// Process every account; returns early only on a fatal error
    pub async fn run(&self, accounts: &[Account], range: &DateRange) -> Result<RunSummary> {
        info!("Generating reports for {} → {}", range.start, range.end);

        let mut summary = RunSummary::default();

        for account in accounts {
            info!("Processing account: {}", account.name);

            if account.credentials.is_none() {
                error!("Missing credentials for {}", account.name);
                summary.skipped += 1;
                continue;
            }

            match self.process(account, range).await {
                Ok(hidden) => {
                    summary.sent += 1;
                    summary.hidden += hidden;
                }
                Err(e) if e.is_fatal() => {
                    error!("Aborting run at account {}: {}", account.name, e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Error processing account {}: {}", account.name, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            hidden_lines = summary.hidden,
            "Run complete"
        );
        Ok(summary)
    }

    /// Returns how many near-zero groups the sent report left out
    async fn process(&self, account: &Account, range: &DateRange) -> Result<usize> {
        let groups = self.source.fetch(account, range).await?;
        let report = ReportFormatter::build(&account.name, range, groups);
        if report.hidden_count > 0 {
            debug!(
                account = %account.name,
                hidden = report.hidden_count,
                "Left out near-zero line items"
            );
        }
        let body = ReportFormatter::render(&report);
        let subject = ReportFormatter::subject(&report);
        self.mailer.send(&subject, &body).await?;
        Ok(report.hidden_count)
    }
}
