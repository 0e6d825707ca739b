//! Report formatter: ranks per-service costs and renders the text body

use crate::types::{CostGroup, DateRange, Report};

/// Width of the service-name column
const SERVICE_WIDTH: usize = 30;

/// Width of the right-aligned amount column
const AMOUNT_WIDTH: usize = 10;

/// Width of the `=` and `-` rules
const RULE_WIDTH: usize = 50;

/// Format a dollar amount with thousands separators and 2 decimals
/// (e.g., 1234.5 -> "1,234.50", -12.345 -> "-12.35")
pub fn format_currency(amount: f64) -> String {
    // `{:.2}` rounds the stored binary value exactly
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let negative = amount < 0.0 && fixed != "0.00";
    let mut result = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if negative {
        result.push('-');
    }

    // Digits are ASCII, so byte indexing is safe
    let len = whole.len();
    for (i, ch) in whole.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result.push('.');
    result.push_str(cents);
    result
}

/// Builds and renders cost reports
pub struct ReportFormatter;

impl ReportFormatter {
    /// Rank `groups` for display; the total covers every group, hidden or not
    pub fn build(account_name: &str, range: &DateRange, groups: Vec<CostGroup>) -> Report {
        let total: f64 = groups.iter().map(|g| g.amount).sum();
        let before = groups.len();

        let mut items: Vec<CostGroup> = groups
            .into_iter()
            .filter(|g| !g.rounds_to_zero())
            .collect();
        // Stable: equal amounts keep API order
        items.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        Report {
            account_name: account_name.to_string(),
            range: range.clone(),
            hidden_count: before - items.len(),
            items,
            total,
        }
    }

    /// Render the fixed-width plain-text body
    pub fn render(report: &Report) -> String {
        let range = &report.range;
        let mut lines = Vec::with_capacity(report.items.len() + 5);

        lines.push(format!(
            "AWS Cost Report for {} ({} to {})",
            range.label, range.start, range.end
        ));
        lines.push(format!("Account: {}", report.account_name));
        lines.push("=".repeat(RULE_WIDTH));
        for item in &report.items {
            lines.push(Self::line(&item.service, item.amount));
        }
        lines.push("-".repeat(RULE_WIDTH));
        lines.push(Self::line("TOTAL", report.total));

        lines.join("\n")
    }

    /// Email subject for a report
    pub fn subject(report: &Report) -> String {
        format!(
            "AWS Cost Report for {} – {}",
            report.account_name, report.range.label
        )
    }

    fn line(label: &str, amount: f64) -> String {
        format!(
            "{:<sw$} ${:>aw$}",
            label,
            format_currency(amount),
            sw = SERVICE_WIDTH,
            aw = AMOUNT_WIDTH
        )
    }
}
