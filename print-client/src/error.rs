//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport failed (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session expired or token missing; the caller clears the session
    /// and redirects to login
    #[error("Authentication required")]
    Unauthorized,

    /// Backend returned no record for the identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the request at the business level (`code != 0`)
    #[error("Business error {code}: {message}")]
    Business { code: i64, message: String },

    /// Response body did not match the expected envelope
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
