//! CloudWatch Logs Insights backend

use super::backend::{BackendError, InsightsBackend, QueryId};
use super::types::{QueryResult, QuerySpec, QueryStatistics, QueryStatus, ResultField};
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::Client;

/// [`InsightsBackend`] backed by the AWS CloudWatch Logs API
#[derive(Clone)]
pub struct CloudWatchBackend {
    client: Client,
}

impl CloudWatchBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the default AWS credential chain.
    ///
    /// `region` overrides the region the chain would otherwise pick.
    pub async fn from_env(region: Option<String>) -> Self {
        let sdk_config = crate::aws::load_sdk_config(region).await;
        Self::from_sdk_config(&sdk_config)
    }

    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig) -> Self {
        tracing::info!(
            region = ?sdk_config.region().map(|r| r.to_string()),
            "CloudWatch Logs client configured"
        );

        Self::new(Client::new(sdk_config))
    }
}

#[async_trait]
impl InsightsBackend for CloudWatchBackend {
    fn name(&self) -> &str {
        "cloudwatch-logs"
    }

    async fn start_query(&self, spec: &QuerySpec) -> Result<QueryId, BackendError> {
        let output = self
            .client
            .start_query()
            .log_group_name(spec.log_group_name.as_str())
            .start_time(spec.start_epoch)
            .end_time(spec.end_epoch)
            .query_string(spec.query_text.as_str())
            .send()
            .await
            .map_err(|e| BackendError::Submit(DisplayErrorContext(e).to_string()))?;

        output
            .query_id()
            .map(str::to_string)
            .ok_or(BackendError::MissingQueryId)
    }

    async fn get_query_results(&self, query_id: &str) -> Result<QueryResult, BackendError> {
        let output = self
            .client
            .get_query_results()
            .query_id(query_id)
            .send()
            .await
            .map_err(|e| BackendError::Poll(DisplayErrorContext(e).to_string()))?;

        let status = output
            .status()
            .map(|s| QueryStatus::from_backend(s.as_str()))
            .unwrap_or_else(|| QueryStatus::Unknown(String::new()));

        let results = output
            .results()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        ResultField::new(
                            cell.field().unwrap_or_default(),
                            cell.value().unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .collect();

        let statistics = output.statistics().map(|s| QueryStatistics {
            bytes_scanned: s.bytes_scanned(),
            records_matched: s.records_matched(),
            records_scanned: s.records_scanned(),
        });

        Ok(QueryResult {
            results,
            statistics,
            status,
        })
    }
}
