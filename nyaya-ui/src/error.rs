//! Error types for the nyaya client

use crate::forms::FormErrors;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, bad body)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the backend
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Form input rejected before anything was sent
    #[error("Invalid input: {0}")]
    Validation(FormErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio device or WAV codec failure
    #[error("Audio error: {0}")]
    Audio(String),
}

impl From<FormErrors> for ClientError {
    fn from(errors: FormErrors) -> Self {
        ClientError::Validation(errors)
    }
}

impl From<hound::Error> for ClientError {
    fn from(err: hound::Error) -> Self {
        ClientError::Audio(format!("WAV codec: {}", err))
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
