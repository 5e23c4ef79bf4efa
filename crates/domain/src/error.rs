//! Unified error types for the domain layer
//!
//! Provides a common error type for value-object construction so adapters
//! can report invalid input without falling back to `String` or `anyhow`.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}

impl DomainError {
    /// Creates a validation error for violated value-object constraints.
    ///
    /// # Example
    /// ```ignore
    /// if token.trim().is_empty() {
    ///     return Err(DomainError::validation("Credential cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = DomainError::invalid_id("event id cannot be empty");
        assert_eq!(err.to_string(), "Invalid ID format: event id cannot be empty");
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
