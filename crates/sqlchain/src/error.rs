//! Error types for sqlchain

use thiserror::Error;

/// Result type alias for statement rendering
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors reported when a statement cannot be rendered.
///
/// Builder mutators never fail on their own; the first problem they hit is
/// recorded and returned by the next terminal render call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// A positional argument has the wrong shape for the requested clause
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A nested builder failed to render
    #[error("Sub-query error: {0}")]
    SubQuery(String),
}

impl SqlError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wrap the error of a nested builder with the clause it was used in
    pub fn sub_query(context: &str, err: SqlError) -> Self {
        Self::SubQuery(format!("{context}: {err}"))
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
