//! Cache-and-sync coordination.
//!
//! [`Session`] fronts the remote answer service with the local cache:
//! `send` answers cache-first and populates on a miss, `lookup` probes the
//! cache only, and `sync` invalidates the whole cache before acknowledging
//! with the remote authority.
//!
//! Concurrent `send` calls for the same query are not deduplicated; both
//! fetch and the last populate wins, which is harmless because the
//! contents are expected to match. A `sync` racing an in-flight `send` is
//! undefined; callers needing strict consistency serialize the two.

use crate::remote::{AnswerError, AnswerService};
use crate::sanitize::sanitize;
use spotlight_core::{CacheDb, CachedAnswer, Error as CacheError};
use std::sync::Arc;

/// Failure stages of a sync pass.
///
/// A sync either reaches its full post-state (cache empty and remote
/// acknowledged) or reports exactly which stage failed.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The clear ran but rows survived it.
    #[error("cache clear left {remaining} entries behind")]
    Clear { remaining: u64 },

    /// The store rejected the clear or the post-clear count.
    #[error("cache clear failed: {0}")]
    Store(#[from] CacheError),

    /// The remote service rejected the sync notification.
    #[error("sync notification failed: {0}")]
    Notify(#[source] AnswerError),
}

/// Cache-and-sync coordinator over one cache store and one answer backend.
#[derive(Clone)]
pub struct Session {
    cache: CacheDb,
    remote: Arc<dyn AnswerService>,
}

impl Session {
    pub fn new(cache: CacheDb, remote: Arc<dyn AnswerService>) -> Self {
        Self { cache, remote }
    }

    /// Answer a query, cache-first.
    ///
    /// The raw input is sanitized once; that text is both the cache key and
    /// the transmitted query, so a hit and the record it returns always
    /// agree on identity. Cache failures are absorbed: a probe error falls
    /// back to the remote fetch, and a populate error still returns the
    /// freshly fetched answer.
    pub async fn send(&self, query: &str) -> Result<CachedAnswer, AnswerError> {
        let q = sanitize(query);

        match self.cache.get_answer(&q).await {
            Ok(Some(hit)) => {
                tracing::debug!(query = %q, "cache hit");
                return Ok(hit);
            }
            Ok(None) => tracing::debug!(query = %q, "cache miss"),
            Err(e) => tracing::warn!(query = %q, error = %e, "cache probe failed, falling back to remote"),
        }

        let answer = self.remote.fetch_answer(&q).await?;

        if let Err(e) = self.cache.put_answer(&answer).await {
            tracing::warn!(query = answer.query(), error = %e, "failed to cache answer");
        }

        Ok(answer)
    }

    /// Probe the cache under the sanitized key without touching the network.
    pub async fn lookup(&self, query: &str) -> Result<Option<CachedAnswer>, CacheError> {
        self.cache.get_answer(&sanitize(query)).await
    }

    /// Invalidate the local cache and acknowledge with the remote service.
    ///
    /// The remote is only notified once the local clear is verified via a
    /// row count; a clear that leaves rows behind aborts the pass without
    /// claiming an invalidation that did not happen.
    pub async fn sync(&self) -> Result<(), SyncError> {
        self.cache.clear_answers().await?;

        let remaining = self.cache.count_answers().await?;
        if remaining > 0 {
            return Err(SyncError::Clear { remaining });
        }
        tracing::debug!("cache cleared, notifying remote");

        self.remote.notify_sync().await.map_err(SyncError::Notify)?;

        Ok(())
    }
}
