//! Error types shared by the word book, the taxonomy and the quiz engine.

use thiserror::Error;

/// Result type for word book operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A required field was empty, a taxonomy selection was missing, or a word already exists
    #[error("Validation error: {0}")]
    Validation(String),

    /// No enabled word matched the quiz filter
    #[error("No quizzable words match the current selection")]
    EmptyPool,

    /// Word id or taxonomy path does not exist (stale reference from the view)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Quiz command issued in the wrong phase
    #[error("Invalid quiz state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
