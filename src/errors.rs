//! Error types for the netopia-rs library.
//!
//! This module defines all error types that can occur while talking to the
//! payment gateway or handling its notifications.

use thiserror::Error;

/// Main error type for gateway operations.
#[derive(Error, Debug)]
pub enum NetopiaError {
    /// Error during HTTP request/response handling
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error parsing URL
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// The gateway answered with a non-success status code
    #[error("Gateway returned status {status}: {body}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Invalid notification payload
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Notification verification failed
    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, NetopiaError>;
