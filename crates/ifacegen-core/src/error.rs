use thiserror::Error;

/// Core error type for ifacegen operations.
#[derive(Error, Debug)]
pub enum IfacegenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid symbol model: {0}")]
    InvalidModel(String),
}

impl From<serde_json::Error> for IfacegenError {
    fn from(e: serde_json::Error) -> Self {
        IfacegenError::Serialization(e.to_string())
    }
}

/// Result type alias using IfacegenError.
pub type Result<T> = std::result::Result<T, IfacegenError>;
