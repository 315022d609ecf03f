//! Error types for the permgroup core.

use thiserror::Error;

/// Core errors that can occur while encoding or decoding a permission document.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

/// Validation errors for names and permission tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must be 1-16 characters, got {0}")]
    NameLength(usize),

    #[error("name contains illegal character {0:?}")]
    NameCharacter(char),

    #[error("permission token must be 6-12 characters, got {0}")]
    TokenLength(usize),

    #[error("permission token contains illegal character {0:?}")]
    TokenCharacter(char),
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() {
            CoreError::MalformedDocument(e.to_string())
        } else {
            CoreError::DecodingError(e.to_string())
        }
    }
}
