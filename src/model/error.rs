//! Error types for the buscador client.
//!
//! Errors are grouped by the boundary they cross, each one a `thiserror` enum
//! composing through `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level start-up/shutdown error
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing initialization failures
//!   - `std::io::Error` - terminal failures
//! - [`RequestError`] - backend request failures (never fatal)
//! - [`ExportError`] - CSV file write failures (never fatal)
//! - [`PayloadError`] - malformed favorite payloads (strict parsing only)
//!
//! # Recovery Strategy
//!
//! Only [`AppError`] terminates the program. Request failures become inline
//! placeholders in the panel that issued them, export failures become a status
//! bar message, and malformed payloads degrade to "nothing to export". Every
//! failure path leaves the previous state intact.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Returned from `main` when the client cannot start or the terminal breaks.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The HTTP client could not be constructed.
    #[error("Backend client error: {0}")]
    Client(#[from] RequestError),

    /// Terminal or TUI rendering error.
    ///
    /// Raw mode, alternate screen or drawing failed. The shell attempts to
    /// restore the terminal before returning this.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// A request to the search backend failed.
///
/// [`RequestError::Network`] and [`RequestError::Server`] are deliberately
/// indistinguishable at the UI boundary: both render the same inline error
/// placeholder (see [`RequestError::is_inline_failure`]). The distinction is
/// kept for logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout, client construction).
    #[error("Network failure: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Server returned status {status}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
    },

    /// The response body did not match the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl RequestError {
    /// Whether this failure should render as the generic inline error state.
    ///
    /// Decode failures count as well: a body we cannot read is as useless to
    /// the list as a 500.
    pub fn is_inline_failure(&self) -> bool {
        matches!(
            self,
            RequestError::Network(_) | RequestError::Server { .. } | RequestError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RequestError::Server {
                status: status.as_u16(),
            }
        } else {
            RequestError::Network(err.to_string())
        }
    }
}

/// Writing an exported CSV file failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The download directory could not be created.
    #[error("Failed to create download directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV file could not be written.
    #[error("Failed to write {path:?}: {source}")]
    Write {
        /// Target file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A favorite's stored payload is not a JSON array of strings.
///
/// Only produced by [`crate::export::parse_favorite_payload`]. The favorite
/// export path maps it to a silent no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Payload was absent or blank.
    #[error("Favorite payload is empty")]
    Empty,

    /// Payload failed to parse.
    #[error("Malformed favorite payload: {0}")]
    Malformed(String),
}
