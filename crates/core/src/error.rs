//! Error types for Khulasa operations.
//!
//! This module defines the main error type [`KhulasaError`] which represents
//! everything that can go wrong while validating a request, fetching a page,
//! calling the upstream summarizer, or loading a dictionary.
//!
//! Every variant classifies into one [`ErrorKind`], a closed set that the
//! HTTP layer turns into a status code.
//!
//! # Example
//!
//! ```rust
//! use khulasa_core::{ErrorKind, KhulasaError};
//!
//! let err = KhulasaError::InvalidUrl("ftp://example.com".to_string());
//! assert_eq!(err.kind(), ErrorKind::InvalidInput);
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Closed classification of failures surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller sent something unusable (bad URL, malformed body).
    InvalidInput,
    /// The upstream service could not be reached in time.
    UpstreamUnavailable,
    /// The upstream service answered, but with a failure.
    UpstreamError,
    /// Misconfiguration or a local fault.
    InternalFailure,
}

/// Main error type for summarization operations.
#[derive(Error, Debug)]
pub enum KhulasaError {
    /// HTTP transport errors from reqwest.
    ///
    /// DNS failures, refused connections and other problems reaching a host.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided by the caller.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request body could not be understood.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The upstream service returned a non-success status.
    #[error("Upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The article page itself returned a non-success status.
    #[error("Article page returned status {status}: {message}")]
    PageFetch { status: u16, message: String },

    /// The article page exceeded the configured download limit.
    #[error("Article page is larger than {limit} bytes")]
    PageTooLarge { limit: usize },

    /// The upstream service returned a body that could not be decoded.
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    /// No API key is configured for the summarization service.
    #[error("RapidAPI key is missing")]
    MissingApiKey,

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A dictionary file could not be parsed.
    #[error("Dictionary error: {0}")]
    DictionaryError(String),

    /// HTML could not be processed.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KhulasaError {
    /// Classifies this error into its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) | Self::InvalidRequest(_) => ErrorKind::InvalidInput,
            #[cfg(feature = "fetch")]
            Self::HttpError(_) => ErrorKind::UpstreamUnavailable,
            Self::Timeout { .. } => ErrorKind::UpstreamUnavailable,
            Self::Upstream { .. }
            | Self::PageFetch { .. }
            | Self::PageTooLarge { .. }
            | Self::InvalidResponse(_) => ErrorKind::UpstreamError,
            Self::MissingApiKey
            | Self::ConfigError(_)
            | Self::DictionaryError(_)
            | Self::HtmlParseError(_)
            | Self::FileNotFound(_)
            | Self::Io(_) => ErrorKind::InternalFailure,
        }
    }

    /// Message suitable for showing to an end user.
    ///
    /// Internal details (paths, I/O causes) are not exposed.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidUrl(_) => "Please provide a valid URL".to_string(),
            Self::InvalidRequest(reason) => format!("Invalid request: {}", reason),
            Self::MissingApiKey => "Server configuration error: RapidAPI key is missing.".to_string(),
            Self::Upstream { message, .. } => format!("Failed to summarize from RapidAPI: {}", message),
            Self::PageFetch { message, .. } => format!("Failed to fetch the article page: {}", message),
            Self::PageTooLarge { limit } => {
                format!("Failed to fetch the article page: it is larger than {} bytes.", limit)
            }
            Self::InvalidResponse(_) => "Failed to summarize from RapidAPI: unreadable response.".to_string(),
            Self::Timeout { timeout } => format!("The summarization service did not respond within {} seconds.", timeout),
            #[cfg(feature = "fetch")]
            Self::HttpError(e) => format!("Failed to reach the summarization service: {}", e),
            _ => "An unexpected error occurred.".to_string(),
        }
    }
}

/// Result type alias for KhulasaError.
pub type Result<T> = std::result::Result<T, KhulasaError>;
