//! Logs Insights value types
//!
//! `QuerySpec` is what gets submitted; `QueryResult` is what comes back. The
//! result is serialized with the backend's own field names (`Results`,
//! `Statistics`, `Status`) and handed to callers unchanged.

use crate::params::TimeRange;
use serde::{Deserialize, Serialize};

/// Everything needed to start one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    /// Window start, Unix seconds
    pub start_epoch: i64,
    /// Window end, Unix seconds
    pub end_epoch: i64,
    pub log_group_name: String,
    pub query_text: String,
}

impl QuerySpec {
    pub fn new(
        range: &TimeRange,
        log_group_name: impl Into<String>,
        query_text: impl Into<String>,
    ) -> Self {
        Self {
            start_epoch: range.start_epoch(),
            end_epoch: range.end_epoch(),
            log_group_name: log_group_name.into(),
            query_text: query_text.into(),
        }
    }
}

/// Execution state reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryStatus {
    Scheduled,
    Running,
    Complete,
    Failed,
    Cancelled,
    Timeout,
    /// A status this client does not know about
    #[serde(untagged)]
    Unknown(String),
}

impl QueryStatus {
    /// Parse the backend's status string
    pub fn from_backend(s: &str) -> Self {
        match s {
            "Scheduled" => QueryStatus::Scheduled,
            "Running" => QueryStatus::Running,
            "Complete" => QueryStatus::Complete,
            "Failed" => QueryStatus::Failed,
            "Cancelled" => QueryStatus::Cancelled,
            "Timeout" => QueryStatus::Timeout,
            other => QueryStatus::Unknown(other.to_string()),
        }
    }

    /// Anything but running/scheduled ends polling
    pub fn is_terminal(&self) -> bool {
        !matches!(self, QueryStatus::Running | QueryStatus::Scheduled)
    }
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryStatus::Scheduled => write!(f, "Scheduled"),
            QueryStatus::Running => write!(f, "Running"),
            QueryStatus::Complete => write!(f, "Complete"),
            QueryStatus::Failed => write!(f, "Failed"),
            QueryStatus::Cancelled => write!(f, "Cancelled"),
            QueryStatus::Timeout => write!(f, "Timeout"),
            QueryStatus::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// One field/value cell of a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultField {
    pub field: String,
    pub value: String,
}

impl ResultField {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Scan statistics reported with the result
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryStatistics {
    pub bytes_scanned: f64,
    pub records_matched: f64,
    pub records_scanned: f64,
}

/// Result payload of a finished (or still running) query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryResult {
    pub results: Vec<Vec<ResultField>>,
    pub statistics: Option<QueryStatistics>,
    pub status: QueryStatus,
}

impl QueryResult {
    /// A result with no rows yet
    pub fn pending(status: QueryStatus) -> Self {
        Self {
            results: Vec::new(),
            statistics: None,
            status,
        }
    }

    pub fn row_count(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!QueryStatus::Running.is_terminal());
        assert!(!QueryStatus::Scheduled.is_terminal());
        for status in [
            QueryStatus::Complete,
            QueryStatus::Failed,
            QueryStatus::Cancelled,
            QueryStatus::Timeout,
            QueryStatus::Unknown("Draining".to_string()),
        ] {
            assert!(status.is_terminal(), "{}", status);
        }
    }

    #[test]
    fn test_status_from_backend() {
        assert_eq!(QueryStatus::from_backend("Complete"), QueryStatus::Complete);
        assert_eq!(QueryStatus::from_backend("Running"), QueryStatus::Running);
        assert_eq!(
            QueryStatus::from_backend("Unknown"),
            QueryStatus::Unknown("Unknown".to_string())
        );
    }

    #[test]
    fn test_result_wire_shape() {
        let result = QueryResult {
            results: vec![vec![
                ResultField::new("@timestamp", "2020-09-16 09:25:00.347"),
                ResultField::new("fields.ProductNumber", "Y0U23A"),
            ]],
            statistics: Some(QueryStatistics {
                bytes_scanned: 1024.0,
                records_matched: 1.0,
                records_scanned: 12.0,
            }),
            status: QueryStatus::Complete,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["Status"], "Complete");
        assert_eq!(json["Results"][0][1]["Field"], "fields.ProductNumber");
        assert_eq!(json["Results"][0][1]["Value"], "Y0U23A");
        assert_eq!(json["Statistics"]["RecordsMatched"], 1.0);
    }

    #[test]
    fn test_spec_from_range() {
        use chrono::{TimeZone, Utc};

        let range = TimeRange {
            start: Utc.timestamp_opt(1590751918, 0).unwrap(),
            end: Utc.timestamp_opt(1590755518, 0).unwrap(),
        };
        let spec = QuerySpec::new(&range, "/aws/lambda/AWSParser", "fields @timestamp");

        assert_eq!(spec.start_epoch, 1590751918);
        assert_eq!(spec.end_epoch, 1590755518);
        assert_eq!(spec.log_group_name, "/aws/lambda/AWSParser");
    }
}
