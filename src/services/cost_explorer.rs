//! Cost fetcher backed by AWS Cost Explorer
//!
//! Queries monthly unblended cost grouped by service for one account,
//! using that account's static credentials and region.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_costexplorer::config::Credentials;
use aws_sdk_costexplorer::error::DisplayErrorContext;
use aws_sdk_costexplorer::types::{
    DateInterval, Granularity, GroupDefinition, GroupDefinitionType, ResultByTime,
};
use aws_sdk_costexplorer::Client;
use tracing::debug;

use crate::types::{Account, AwsCredentials, CostGroup, DateRange, ReportError, Result};

/// Cost metric requested from the billing API
const COST_METRIC: &str = "UnblendedCost";

/// Dimension used to group costs
const GROUP_BY_DIMENSION: &str = "SERVICE";

/// Provider name attached to the static credentials
const CREDENTIALS_PROVIDER: &str = "cost-report";

/// Source of per-service costs for an account and period
#[allow(async_fn_in_trait)]
pub trait CostSource {
    async fn fetch(&self, account: &Account, range: &DateRange) -> Result<Vec<CostGroup>>;
}

/// AWS Cost Explorer implementation of [`CostSource`]
#[derive(Debug, Default)]
pub struct CostExplorerSource;

impl CostExplorerSource {
    async fn client_for(account: &Account, credentials: &AwsCredentials) -> Client {
        let credentials = Credentials::new(
            credentials.access_key.clone(),
            credentials.secret_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(account.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;
        Client::new(&config)
    }
}

impl CostSource for CostExplorerSource {
    async fn fetch(&self, account: &Account, range: &DateRange) -> Result<Vec<CostGroup>> {
        let credentials = account.credentials.as_ref().ok_or_else(|| {
            ReportError::Fetch(format!("no credentials for account {}", account.name))
        })?;
        let client = Self::client_for(account, credentials).await;

        let period = time_period(range)?;

        debug!(
            account = %account.name,
            start = %range.start,
            end = %range.end,
            "Querying Cost Explorer"
        );

        let response = client
            .get_cost_and_usage()
            .time_period(period)
            .granularity(Granularity::Monthly)
            .metrics(COST_METRIC)
            .group_by(
                GroupDefinition::builder()
                    .r#type(GroupDefinitionType::Dimension)
                    .key(GROUP_BY_DIMENSION)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| ReportError::Fetch(DisplayErrorContext(&e).to_string()))?;

        let result = response
            .results_by_time()
            .first()
            .ok_or_else(|| ReportError::Fetch("response contained no results".into()))?;

        groups_from_result(result)
    }
}

/// Billing window for `range`; Cost Explorer treats `End` as exclusive
pub fn time_period(range: &DateRange) -> Result<DateInterval> {
    DateInterval::builder()
        .start(range.start.to_string())
        .end(range.end.to_string())
        .build()
        .map_err(|e| ReportError::Fetch(format!("invalid time period: {}", e)))
}

/// Convert one billing period's groups into [`CostGroup`]s, in response order
pub fn groups_from_result(result: &ResultByTime) -> Result<Vec<CostGroup>> {
    result
        .groups()
        .iter()
        .map(|group| {
            let service = group
                .keys()
                .first()
                .ok_or_else(|| ReportError::Parse("group has no service key".into()))?;

            let raw = group
                .metrics()
                .and_then(|metrics| metrics.get(COST_METRIC))
                .and_then(|metric| metric.amount())
                .ok_or_else(|| {
                    ReportError::Parse(format!("{} has no {} amount", service, COST_METRIC))
                })?;

            let amount: f64 = raw.parse().map_err(|_| {
                ReportError::Parse(format!("{} has invalid amount {:?}", service, raw))
            })?;

            Ok(CostGroup::new(service.as_str(), amount))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_costexplorer::types::{Group, MetricValue};

    fn group(service: &str, amount: &str) -> Group {
        Group::builder()
            .keys(service)
            .metrics(
                COST_METRIC,
                MetricValue::builder().amount(amount).unit("USD").build(),
            )
            .build()
    }

    #[test]
    fn test_time_period_sends_month_start_and_last_day() {
        let range = crate::services::period::previous_month(
            chrono::NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(),
        );
        let period = time_period(&range).unwrap();
        assert_eq!(period.start(), "2024-03-01");
        assert_eq!(period.end(), "2024-03-31");
    }

    #[test]
    fn test_groups_from_result_keeps_order() {
        let result = ResultByTime::builder()
            .groups(group("Amazon EC2", "123.456"))
            .groups(group("Amazon S3", "0.004"))
            .groups(group("AWS Lambda", "50"))
            .build();

        let groups = groups_from_result(&result).unwrap();
        assert_eq!(
            groups,
            vec![
                CostGroup::new("Amazon EC2", 123.456),
                CostGroup::new("Amazon S3", 0.004),
                CostGroup::new("AWS Lambda", 50.0),
            ]
        );
    }

    #[test]
    fn test_groups_from_empty_result() {
        let result = ResultByTime::builder().build();
        assert!(groups_from_result(&result).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_amount_is_parse_error() {
        let result = ResultByTime::builder()
            .groups(group("Amazon EC2", "twelve"))
            .build();
        let err = groups_from_result(&result).unwrap_err();
        assert!(matches!(err, ReportError::Parse(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_missing_metric_is_parse_error() {
        let result = ResultByTime::builder()
            .groups(Group::builder().keys("Amazon EC2").build())
            .build();
        assert!(matches!(
            groups_from_result(&result),
            Err(ReportError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_key_is_parse_error() {
        let result = ResultByTime::builder()
            .groups(
                Group::builder()
                    .metrics(COST_METRIC, MetricValue::builder().amount("1.00").build())
                    .build(),
            )
            .build();
        assert!(matches!(
            groups_from_result(&result),
            Err(ReportError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_without_credentials_fails_before_network() {
        let account = Account {
            name: "it-dev".to_string(),
            account_id: "12345678".to_string(),
            region: "us-east-2".to_string(),
            credentials: None,
        };
        let range = crate::services::period::previous_month(
            chrono::NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );
        let err = CostExplorerSource.fetch(&account, &range).await.unwrap_err();
        assert!(matches!(err, ReportError::Fetch(_)));
    }
}
