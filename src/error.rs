//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// `Genius` API error with status context
    #[error("Genius API error: {message}")]
    Genius {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Classification service error
    #[error("Classifier error: {message}")]
    Classifier {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Dataset table error
    #[error("Dataset error: {0}")]
    Dataset(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a `Genius` error without a status
    pub fn genius(message: impl Into<String>) -> Self {
        Self::Genius {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create a `Genius` error with HTTP status
    pub fn genius_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check the GENIUS_TOKEN environment variable"),
            403 => Some("Your Genius token may lack required permissions"),
            404 => Some("The requested artist or song was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Genius server error - try again later"),
            _ => None,
        };
        Self::Genius {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a classifier error, optionally carrying the HTTP status
    pub fn classifier(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Classifier { message: message.into(), status }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Whether a request that failed with this error is worth repeating.
    ///
    /// Network failures, rate limiting and server-side errors are transient;
    /// everything else fails the same way on every attempt.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Genius { status: Some(status), .. }
            | Self::Classifier { status: Some(status), .. } => {
                *status == 429 || (*status >= 500 && *status <= 599)
            }
            _ => false,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Dataset(e.to_string())
    }
}
