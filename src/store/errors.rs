//! # Store Errors
//!
//! Error types for the datastore module.

use thiserror::Error;

/// Result type for datastore operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Datastore errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite operation failed
    #[error("datastore error: {0}")]
    Database(#[from] sqlx::Error),
}
