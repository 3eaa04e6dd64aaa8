//! Request-intercepting mock backend for local development.
//!
//! Stands in for the remote answer service behind the same [`AnswerService`]
//! boundary: lookups echo the query with an empty snippet list, and sync
//! acknowledgements are delayed to mimic a slow reconciliation pass.

use crate::remote::{AnswerError, AnswerService, HealthStatus};
use async_trait::async_trait;
use spotlight_core::CachedAnswer;
use std::time::Duration;

/// Artificial latency on sync acknowledgements.
const DEFAULT_SYNC_DELAY: Duration = Duration::from_secs(5);

/// In-process stand-in for the answer service.
#[derive(Debug, Clone)]
pub struct MockAnswerService {
    sync_delay: Duration,
}

impl MockAnswerService {
    pub fn new() -> Self {
        Self { sync_delay: DEFAULT_SYNC_DELAY }
    }

    /// Override the sync acknowledgement delay.
    pub fn with_sync_delay(sync_delay: Duration) -> Self {
        Self { sync_delay }
    }
}

impl Default for MockAnswerService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerService for MockAnswerService {
    async fn fetch_answer(&self, query: &str) -> Result<CachedAnswer, AnswerError> {
        tracing::info!(query, "mock answer lookup");
        Ok(CachedAnswer::new(query, Vec::new()))
    }

    async fn notify_sync(&self) -> Result<(), AnswerError> {
        tracing::info!(delay_ms = self.sync_delay.as_millis() as u64, "mock sync acknowledgement");
        tokio::time::sleep(self.sync_delay).await;
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, AnswerError> {
        Ok(HealthStatus { status: "OK".into(), details: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_echoes_query() {
        let mock = MockAnswerService::new();
        let answer = mock.fetch_answer("find cats").await.unwrap();
        assert_eq!(answer.query(), "find cats");
        assert!(answer.snippet_ids().is_empty());
    }

    #[tokio::test]
    async fn test_mock_sync_acknowledges() {
        let mock = MockAnswerService::with_sync_delay(Duration::from_millis(0));
        mock.notify_sync().await.unwrap();
    }

    #[tokio::test]
    async fn test_mock_health_ok() {
        let mock = MockAnswerService::new();
        let health = mock.health().await.unwrap();
        assert_eq!(health.status, "OK");
    }
}
