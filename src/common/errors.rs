//! Error types for the application

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// A secret parameter could not be found
    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    /// The secret store refused access to a parameter
    #[error("Access denied to secret: {0}")]
    AccessDenied(String),

    /// HTTP request errors (connect, timeout, body read)
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The exchange answered with a non-success status
    #[error("Server returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body could not be parsed
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Price is zero or negative
    #[error("Invalid price: {0}")]
    InvalidPrice(Decimal),

    /// The exchange did not hand back an acceptance id.
    /// The raw response body is kept since it usually carries the reason.
    #[error("{body}")]
    OrderRejected { body: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error classification, stable across message changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SecretNotFound,
    AccessDenied,
    Transport,
    Encode,
    Decode,
    InvalidPrice,
    OrderRejected,
    Configuration,
    Timeout,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SecretNotFound => "secret_not_found",
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::Transport => "transport",
            ErrorKind::Encode => "encode",
            ErrorKind::Decode => "decode",
            ErrorKind::InvalidPrice => "invalid_price",
            ErrorKind::OrderRejected => "order_rejected",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClientError {
    /// Classify the error for logging
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::SecretNotFound(_) => ErrorKind::SecretNotFound,
            ClientError::AccessDenied(_) => ErrorKind::AccessDenied,
            ClientError::Transport(_) | ClientError::HttpStatus { .. } => ErrorKind::Transport,
            ClientError::Encode(_) => ErrorKind::Encode,
            ClientError::Decode(_) => ErrorKind::Decode,
            ClientError::InvalidPrice(_) => ErrorKind::InvalidPrice,
            ClientError::OrderRejected { .. } => ErrorKind::OrderRejected,
            ClientError::Configuration(_) => ErrorKind::Configuration,
            ClientError::Timeout(_) => ErrorKind::Timeout,
            ClientError::Internal(_) => ErrorKind::Internal,
        }
    }
}
