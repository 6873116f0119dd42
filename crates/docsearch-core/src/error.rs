//! Error types and handling for docsearch-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors are
//! grouped into categories so callers can log and branch on them without
//! matching every variant.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading index files, cache directories
//! - **Network Errors**: fetching a published `search_index.js`
//! - **Parse Errors**: index text that is not a `{"docs": [...]}` document
//! - **Index Errors**: building or querying the full-text index
//! - **Storage Errors**: the local HTTP cache
//! - **Configuration Errors**: unreadable or invalid `config.toml`
//!
//! Malformed individual entries are *not* errors. The parser skips them and
//! records a [`Diagnostic`](crate::Diagnostic) instead, because the index is
//! regenerated wholesale on each documentation build.
//!
//! ```rust
//! use docsearch_core::{Error, parse_index};
//!
//! match parse_index("[1, 2, 3]") {
//!     Err(Error::Parse(msg)) => assert!(msg.contains("object")),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for docsearch-core operations.
///
/// The full source chain is preserved for wrapped I/O and HTTP errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading index files from disk and cache directory access.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Connection and timeout errors are recoverable; other HTTP failures are
    /// not.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The index text does not have the expected top-level shape.
    ///
    /// ## Common Causes
    ///
    /// - The file is not JSON (or not the JS wrapper around JSON)
    /// - The root value is not an object
    /// - The `docs` field is missing or not an array
    #[error("Parse error: {0}")]
    Parse(String),

    /// Full-text index operation failed.
    #[error("Index error: {0}")]
    Index(String),

    /// Cache storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used for missing index files, 404 responses, and build directories
    /// that contain no search index.
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL is malformed or cannot be joined with a location.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for network timeouts, connection failures and
    /// interrupted I/O. Everything else is permanent.
    ///
    /// ```rust
    /// use docsearch_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "slow")).is_recoverable());
    /// assert!(!Error::Parse("not json".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful as a structured logging field:
    ///
    /// ```rust
    /// use docsearch_core::Error;
    ///
    /// let err = Error::NotFound("search_index.js".into());
    /// tracing::error!(category = err.category(), "{err}");
    /// assert_eq!(err.category(), "not_found");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Index(_) => "index",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
