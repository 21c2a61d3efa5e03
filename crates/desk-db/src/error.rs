//! Database error types for desk-db.

use std::time::Duration;

use desk_core::errors::CoreError;
use thiserror::Error;

/// Errors from store and component operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A stored document could not be encoded or decoded.
    #[error("Invalid document in '{collection}': {reason}")]
    Document { collection: String, reason: String },

    /// A store call exceeded the configured timeout.
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    /// Lookup, reference, or validation failure from the domain layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Build a `NotFound` for a well-formed id with no record.
    #[must_use]
    pub fn not_found(entity_type: impl ToString, id: &str) -> Self {
        Self::Core(CoreError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }

    #[must_use]
    pub const fn is_invalid_reference(&self) -> bool {
        matches!(self, Self::Core(CoreError::InvalidReference { .. }))
    }
}
