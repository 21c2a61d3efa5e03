//! Cross-cutting error types for desk.
//!
//! Store-level failures (`DatabaseError`) live in `desk-db`, configuration
//! failures in `desk-config`. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any desk crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result for a well-formed id.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An id was supplied where a lookup was required, but it does not have
    /// the shape of a surrogate id for that entity.
    #[error("Invalid reference: '{id}' is not a valid {entity_type} id")]
    InvalidReference { entity_type: String, id: String },

    /// A numbered selection was outside the offered range.
    #[error("Invalid choice '{input}': expected a number between 1 and {max}")]
    InvalidChoice { input: String, max: usize },

    /// Data failed validation (taxonomy format, issue type membership).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
