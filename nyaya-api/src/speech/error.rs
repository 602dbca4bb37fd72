//! Speech provider errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpeechError {
    /// No engine configured for this direction
    #[error("{0} is not configured on this server")]
    NotConfigured(&'static str),

    /// Engine unreachable or timed out
    #[error("Speech engine request failed: {0}")]
    Network(String),

    /// Engine answered with a non-success status
    #[error("Speech engine returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// Uploaded clip cannot be forwarded as given
    #[error("Invalid audio upload: {0}")]
    InvalidAudio(String),

    /// Engine answered with something we could not use
    #[error("Invalid speech engine response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        SpeechError::Network(err.to_string())
    }
}
