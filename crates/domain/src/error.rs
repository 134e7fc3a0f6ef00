//! Unified error types for the domain layer
//!
//! Provides a common error type for document-level operations (version parsing,
//! shape checks) so the engine can wrap it without resorting to strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The document does not have the expected container shape
    #[error("Malformed project document: {0}")]
    MalformedDocument(String),
}

impl DomainError {
    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match the expected format, e.g. a `_version` marker
    /// such as `"3.x"`.
    ///
    /// # Example
    /// ```ignore
    /// let major = part.parse::<u32>()
    ///     .map_err(|_| DomainError::parse(format!("Invalid version component: {}", part)))?;
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a malformed document error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }
}
