//! Repository Module
//!
//! Typed access to the SurrealDB tables. Every write that guards a shared
//! resource (table occupancy, chef load) is a single conditional statement.

pub mod chef;
pub mod dining_table;
pub mod order;

pub use chef::ChefRepository;
pub use dining_table::DiningTableRepository;
pub use order::OrderRepository;

use crate::utils::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Transaction lost to a concurrent write; the caller treats it like a
    /// condition that matched nothing
    #[error("Write conflict: {0}")]
    Conflict(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        classify_storage_error(err.to_string())
    }
}

/// Map a storage error message onto the matching [`RepoError`] variant
fn classify_storage_error(message: String) -> RepoError {
    let lower = message.to_lowercase();
    if lower.contains("already contains") || lower.contains("already exists") {
        RepoError::Duplicate(message)
    } else if lower.contains("conflict") || lower.contains("can be retried") {
        RepoError::Conflict(message)
    } else {
        RepoError::Database(message)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Conflict(msg) => {
                tracing::warn!(error = %msg, "Write conflict surfaced to caller");
                AppError::new(ErrorCode::SystemBusy)
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Re-run `op` while it fails with [`RepoError::Conflict`], up to `attempts` times
///
/// Only used around single conditional statements, which are safe to repeat:
/// the condition is evaluated again against the committed state.
pub async fn retry_on_conflict<T, F, Fut>(attempts: u32, mut op: F) -> RepoResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RepoResult<T>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Err(RepoError::Conflict(msg)) if attempt < attempts => {
                tracing::debug!(attempt, error = %msg, "Write conflict, retrying");
                attempt += 1;
                tokio::task::yield_now().await;
            }
            other => return other,
        }
    }
}

// =============================================================================
// ID Convention: ids travel as "table:key" strings
// =============================================================================
//
// A bare key ("abc") is accepted as shorthand for "<table>:abc". An id naming a
// different table never resolves, so lookups report it as missing.

/// Parse an API id for `table`, returning None when it cannot name a record there
pub fn parse_record_id(table: &str, id: &str) -> Option<RecordId> {
    let id = id.trim();
    if id.is_empty() {
        return None;
    }
    if !id.contains(':') {
        return Some(RecordId::from_table_key(table, id));
    }
    id.parse::<RecordId>()
        .ok()
        .filter(|record| record.table() == table)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
