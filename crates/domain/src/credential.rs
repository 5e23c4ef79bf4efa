//! Bearer credential value object

use std::fmt;

use crate::error::DomainError;

/// Opaque bearer token proving an authenticated session.
///
/// The token is never rendered by `Debug` or `Display`, so a credential can
/// be carried through structured logs without leaking it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Create a credential from a raw token.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, DomainError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Credential cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Treat blank or missing tokens as "no credential".
    pub fn from_optional(token: Option<String>) -> Option<Self> {
        token.and_then(|t| Self::new(t).ok())
    }

    /// The raw token, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
