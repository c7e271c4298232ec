// src/error.rs

//! Unified error handling for the catalog service.
//!
//! `AppError` is `Clone` so that a single fetch failure can be handed to
//! every caller waiting on the same coalesced fetch. Source errors that are
//! not `Clone` themselves are kept behind an `Arc`.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// No tag was supplied with the request or in the configuration
    #[error("no identifier supplied")]
    MissingTag,

    /// The requested catalog subtype is not one we serve
    #[error("unknown request parameters: {0}")]
    InvalidRequest(String),

    /// The full pagination cycle produced no usable entries
    #[error("no results for this tag")]
    EmptyResult,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(Arc<reqwest::Error>),

    /// A page fetch did not finish within its time budget
    #[error("timed out fetching {context} after {secs}s")]
    Timeout { context: String, secs: u64 },

    /// The in-flight fetch was cancelled before it finished
    #[error("fetch cancelled for {0}")]
    Cancelled(String),

    /// A background fetch task panicked or was aborted
    #[error("fetch task failed: {0}")]
    Task(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(Arc<std::io::Error>),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(Arc<serde_json::Error>),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an invalid request error.
    pub fn invalid_request(message: impl fmt::Display) -> Self {
        Self::InvalidRequest(message.to_string())
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a timeout error for the given request context.
    pub fn timeout(context: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            context: context.into(),
            secs,
        }
    }

    /// Whether the failure came from talking to the remote source.
    ///
    /// Only these are worth retrying.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout { .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_facing_messages() {
        assert_eq!(AppError::MissingTag.to_string(), "no identifier supplied");
        assert_eq!(AppError::EmptyResult.to_string(), "no results for this tag");
        assert!(
            AppError::invalid_request("documentary")
                .to_string()
                .starts_with("unknown request parameters")
        );
    }

    #[test]
    fn test_is_transport() {
        assert!(AppError::timeout("page 1", 10).is_transport());
        assert!(!AppError::EmptyResult.is_transport());
        assert!(!AppError::MissingTag.is_transport());
    }

    #[test]
    fn test_clone_preserves_variant() {
        let err = AppError::from(std::io::Error::other("disk"));
        assert!(matches!(err.clone(), AppError::Io(_)));
    }
}
