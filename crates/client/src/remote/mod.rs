//! Remote answer service client.
//!
//! Provides the HTTP boundary to the answer-lookup service, plus the
//! `AnswerService` trait so a request-intercepting mock backend can stand
//! in for the real service during development.
//!
//! ### Wire contract
//!
//! - `POST {base}/spotlight?q=<query>` → `{"query": ..., "snippet_ids": [...]}`
//! - `POST {base}/sync` (no body) → `{}` on success
//! - `GET {base}/health` → `{"status": "OK"}`
//!
//! Any non-2xx reply surfaces as `AnswerError::HttpStatus`; an error body
//! is never turned into an answer record.

pub mod error;

pub use error::AnswerError;

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use spotlight_core::{AppConfig, CachedAnswer};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Route for answer lookups.
const QUERY_ENDPOINT: &str = "spotlight";

/// Route for the cache invalidation acknowledgement.
const SYNC_ENDPOINT: &str = "sync";

/// Route for the service liveness probe.
const HEALTH_ENDPOINT: &str = "health";

/// Default base URL for the answer service.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "spotlight/0.1";

/// Query length bounds enforced before anything goes on the wire.
/// The service rejects single-character terms; the upper cap keeps the
/// query usable as a URL parameter.
const MIN_QUERY_CHARS: usize = 2;
const MAX_QUERY_CHARS: usize = 400;

/// Answer service client configuration.
#[derive(Debug, Clone)]
pub struct AnswerConfig {
    /// Base URL (default: http://localhost:8000).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: spotlight/0.x).
    pub user_agent: String,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AnswerConfig {
    /// Derive client configuration from the loaded application config.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.backend_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Service liveness report from the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Remote answer service boundary.
///
/// Implemented by [`AnswerClient`] for the real HTTP service and by the
/// mock backend for local development, both conforming to the same wire
/// contract.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Look up the answer for a sanitized query.
    async fn fetch_answer(&self, query: &str) -> Result<CachedAnswer, AnswerError>;

    /// Tell the service the local cache was invalidated.
    async fn notify_sync(&self) -> Result<(), AnswerError>;

    /// Probe service liveness.
    async fn health(&self) -> Result<HealthStatus, AnswerError>;
}

/// HTTP client for the answer service.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    http: reqwest::Client,
    base_url: Url,
    user_agent: String,
}

impl AnswerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: AnswerConfig) -> Result<Self, AnswerError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| AnswerError::InvalidBaseUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnswerError::Network(Arc::new(e)))?;

        Ok(Self { http, base_url, user_agent: config.user_agent })
    }

    fn endpoint(&self, route: &str) -> Result<Url, AnswerError> {
        self.base_url.join(route).map_err(|e| AnswerError::InvalidBaseUrl(e.to_string()))
    }

    fn validate_query(query: &str) -> Result<(), AnswerError> {
        if query.len() < MIN_QUERY_CHARS {
            return Err(AnswerError::InvalidQuery(format!(
                "query too short: {} chars (min {MIN_QUERY_CHARS})",
                query.len()
            )));
        }
        if query.len() > MAX_QUERY_CHARS {
            return Err(AnswerError::InvalidQuery(format!(
                "query too long: {} chars (max {MAX_QUERY_CHARS})",
                query.len()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AnswerService for AnswerClient {
    /// Execute an answer lookup.
    ///
    /// The query travels as the `q` URL parameter; the JSON body of a 2xx
    /// reply deserializes into the answer record.
    async fn fetch_answer(&self, query: &str) -> Result<CachedAnswer, AnswerError> {
        Self::validate_query(query)?;

        let mut url = self.endpoint(QUERY_ENDPOINT)?;
        url.query_pairs_mut().append_pair("q", query);

        tracing::debug!(query, "sending answer lookup");

        let response = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("answer service response status: {}", status);

        if !status.is_success() {
            return Err(AnswerError::HttpStatus { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let answer: CachedAnswer =
            serde_json::from_slice(&bytes).map_err(|e| AnswerError::Parse(e.to_string()))?;

        tracing::debug!(query = answer.query(), snippets = answer.snippet_ids().len(), "answer received");

        Ok(answer)
    }

    /// Acknowledge a local cache invalidation with the service.
    async fn notify_sync(&self) -> Result<(), AnswerError> {
        let url = self.endpoint(SYNC_ENDPOINT)?;

        tracing::debug!("notifying sync endpoint");

        let response = self
            .http
            .post(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnswerError::HttpStatus { status: status.as_u16() });
        }

        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, AnswerError> {
        let url = self.endpoint(HEALTH_ENDPOINT)?;

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnswerError::HttpStatus { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AnswerError::Parse(e.to_string()))
    }
}
