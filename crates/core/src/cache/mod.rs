//! SQLite-backed cache for answer lookups.
//!
//! This module provides a persistent, query-keyed cache using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - One row per sanitized query string (the primary key)
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Whole-table invalidation during sync

pub mod answers;
pub mod connection;
pub mod migrations;

pub use crate::Error;

pub use answers::CachedAnswer;
pub use connection::CacheDb;
