//! Client-side cache and sync layer for the spotlight answer service.
//!
//! This crate provides the query sanitizer, the HTTP client for the remote
//! answer service, and the session coordinator that fronts the remote
//! service with the local answer cache.

pub mod remote;
pub mod sanitize;
pub mod session;

#[cfg(feature = "mock")]
pub mod mock;

pub use remote::{AnswerClient, AnswerConfig, AnswerError, AnswerService, HealthStatus};
pub use sanitize::sanitize;
pub use session::{Session, SyncError};

#[cfg(feature = "mock")]
pub use mock::MockAnswerService;
