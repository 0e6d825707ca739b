//! Report types: billing period, per-service cost, ranked report

use chrono::NaiveDate;

/// A calendar month being reported on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the month
    pub start: NaiveDate,
    /// Last day of the month
    pub end: NaiveDate,
    /// Display label, e.g. "March 2024"
    pub label: String,
}

/// Unblended cost of one service for the period
#[derive(Debug, Clone, PartialEq)]
pub struct CostGroup {
    pub service: String,
    pub amount: f64,
}

impl CostGroup {
    pub fn new(service: impl Into<String>, amount: f64) -> Self {
        Self {
            service: service.into(),
            amount,
        }
    }

    /// True when the amount shows as 0.00 at cent precision
    pub fn rounds_to_zero(&self) -> bool {
        format!("{:.2}", self.amount.abs()) == "0.00"
    }
}

/// Ranked cost report for one account and period
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub account_name: String,
    pub range: DateRange,
    /// Displayed line items, sorted by amount descending
    pub items: Vec<CostGroup>,
    /// Number of groups hidden because they round to 0.00
    pub hidden_count: usize,
    /// Sum over every group, hidden ones included
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_zero() {
        assert!(CostGroup::new("S3", 0.004).rounds_to_zero());
        assert!(CostGroup::new("S3", -0.004).rounds_to_zero());
        assert!(CostGroup::new("S3", 0.0).rounds_to_zero());
        assert!(!CostGroup::new("S3", 0.006).rounds_to_zero());
        assert!(!CostGroup::new("Credits", -0.01).rounds_to_zero());
    }

    #[test]
    fn test_rounds_to_zero_uses_stored_value() {
        // 0.005 is stored just above half a cent
        assert!(!CostGroup::new("S3", 0.005).rounds_to_zero());
        // 0.0049999 stays below half a cent
        assert!(CostGroup::new("S3", 0.0049999).rounds_to_zero());
    }
}
