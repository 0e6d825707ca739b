//! Billing period resolution

use chrono::{Datelike, Days, NaiveDate};

use crate::types::DateRange;

/// Resolve the calendar month immediately before `today`'s month
pub fn previous_month(today: NaiveDate) -> DateRange {
    let first_of_this_month = today - Days::new(u64::from(today.day0()));
    let end = first_of_this_month - Days::new(1);
    let start = end - Days::new(u64::from(end.day0()));

    DateRange {
        start,
        end,
        label: end.format("%B %Y").to_string(),
    }
}
