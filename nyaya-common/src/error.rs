//! Error type for the storage and configuration layer

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Stored record kinds, named in not-found errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Query,
    Document,
    Student,
    Case,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Query => "Query",
            Resource::Document => "Document",
            Resource::Student => "Student",
            Resource::Case => "Case",
        })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Display text is the message returned to API clients
    #[error("{0} not found")]
    NotFound(Resource),

    /// Rejected update or request data; the message is shown to the caller
    #[error("{0}")]
    InvalidInput(String),

    /// A stored column no longer decodes into its wire type
    #[error("Corrupt {column} '{value}': {reason}")]
    Corrupt {
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn corrupt(column: &'static str, value: &str, reason: impl fmt::Display) -> Self {
        Error::Corrupt {
            column,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
