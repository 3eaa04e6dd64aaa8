//! Core types and shared functionality for spotlight.
//!
//! This crate provides:
//! - Local answer cache with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, CachedAnswer};
pub use config::AppConfig;
pub use error::Error;
