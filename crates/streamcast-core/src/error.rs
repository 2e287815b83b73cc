use thiserror::Error;

/// Top-level error type for Streamcast.
///
/// Covers configuration loading and the serialization boundaries shared by
/// every crate. Dispatch failures live in `streamcast_skill::SkillError`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StreamcastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for StreamcastError {
    fn from(err: toml::de::Error) -> Self {
        StreamcastError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StreamcastError {
    fn from(err: toml::ser::Error) -> Self {
        StreamcastError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for StreamcastError {
    fn from(err: serde_json::Error) -> Self {
        StreamcastError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Streamcast operations.
pub type Result<T> = std::result::Result<T, StreamcastError>;
