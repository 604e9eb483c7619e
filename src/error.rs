//! Error types for the quotagate client.

use thiserror::Error;

/// Main error type for quotagate operations.
#[derive(Error, Debug)]
pub enum QuotagateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document encoding errors
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// Transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error produced while encoding a document into its wire payload.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The document was rejected before serialization
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Error produced by the transport while submitting a request.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP request could not be completed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be parsed
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// The submission task ended without reporting a completion
    #[error("Submission aborted before completion")]
    Aborted,
}

/// Result type alias for quotagate operations.
pub type Result<T> = std::result::Result<T, QuotagateError>;
