//! Error types for the MovieFlix client.
//!
//! This module defines the centralized error type [`MovieflixError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with `thiserror`.
//! None of them is fatal: every failure is recoverable by retrying the user action
//! that triggered it.

use thiserror::Error;

/// The main error type for MovieFlix client operations.
///
/// # Examples
///
/// ```
/// use movieflix::MovieflixError;
///
/// fn load() -> Result<(), MovieflixError> {
///     Err(MovieflixError::Storage("snapshot is locked".to_string()))
/// }
/// assert!(load().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MovieflixError {
    /// Reading or writing the persisted session snapshot failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when the request channel or the response channel has been closed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend answered with a non-success status.
    ///
    /// `message` is the backend's own `message` field when it sent one.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable reason reported by the backend.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A specialized `Result` type for MovieFlix operations.
pub type Result<T> = std::result::Result<T, MovieflixError>;
