//! Answer service client error types.

use std::sync::Arc;

/// Errors from the remote answer service client.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    /// The configured base URL could not be parsed or joined.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The query is empty, too short, or too long.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Non-2xx reply from the service.
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AnswerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { AnswerError::Timeout } else { AnswerError::Network(Arc::new(err)) }
    }
}
