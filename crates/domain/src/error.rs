//! Unified error types for the domain layer

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A record could not be encoded to or decoded from its stored form
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if id.is_empty() {
    ///     return Err(DomainError::validation("Asset id cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl ToString) -> Self {
        Self::Serialization(msg.to_string())
    }
}
