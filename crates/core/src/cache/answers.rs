//! Answer cache operations.
//!
//! Provides functions for storing and retrieving cached answer lookups,
//! keyed by the sanitized query text.

use super::connection::CacheDb;
use crate::Error;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;

/// A cached answer for one query.
///
/// Value type: constructed once, never mutated in place. An update for the
/// same query replaces the whole row. `query` holds the sanitized text that
/// produced the answer, and `snippet_ids` keeps the remote relevance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAnswer {
    query: String,
    snippet_ids: Vec<i64>,
}

impl CachedAnswer {
    /// Build an answer record from a sanitized query and its snippet ids.
    pub fn new(query: impl Into<String>, snippet_ids: Vec<i64>) -> Self {
        Self { query: query.into(), snippet_ids }
    }

    /// The sanitized query text this answer was produced for.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Snippet identifiers in relevance order.
    pub fn snippet_ids(&self) -> &[i64] {
        &self.snippet_ids
    }
}

impl CacheDb {
    /// Get the cached answer for an exact query key.
    ///
    /// Returns None if the key doesn't exist in the cache.
    pub async fn get_answer(&self, query: &str) -> Result<Option<CachedAnswer>, Error> {
        let query = query.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CachedAnswer>, Error> {
                let mut stmt = conn.prepare("SELECT snippet_ids FROM answers WHERE query = ?1")?;

                let result = stmt.query_row(params![query], |row| row.get::<_, String>(0));

                match result {
                    Ok(ids_json) => {
                        let snippet_ids: Vec<i64> = serde_json::from_str(&ids_json).map_err(Error::Payload)?;
                        Ok(Some(CachedAnswer::new(query, snippet_ids)))
                    }
                    Err(tokio_rusqlite::rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or replace the cached answer under its own query key.
    ///
    /// Uses UPSERT semantics: last write wins, no versioning. Returns the
    /// store-assigned rowid, which is informational only and never used as
    /// a lookup key.
    pub async fn put_answer(&self, answer: &CachedAnswer) -> Result<i64, Error> {
        let query = answer.query().to_string();
        let ids_json = serde_json::to_string(answer.snippet_ids())?;
        let cached_at = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| -> Result<i64, Error> {
                conn.execute(
                    "INSERT INTO answers (query, snippet_ids, cached_at)
                    VALUES (?1, ?2, ?3)
                    ON CONFLICT(query) DO UPDATE SET
                        snippet_ids = excluded.snippet_ids,
                        cached_at = excluded.cached_at",
                    params![query, ids_json, cached_at],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Error::from)
    }

    /// Remove all cached answers unconditionally.
    pub async fn clear_answers(&self) -> Result<(), Error> {
        self.conn
            .call(|conn| -> Result<(), Error> {
                conn.execute("DELETE FROM answers", [])?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Count the currently cached answers.
    ///
    /// Used after clear_answers to verify the table actually emptied.
    pub async fn count_answers(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM answers", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
