use crate::content::InvariantError;

/// Stored answer content that cannot be turned back into a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("answer content is not valid JSON: {reason}")]
    Json { reason: String },
    #[error("unknown block type `{0}`")]
    UnknownBlockType(String),
    #[error("unknown entity type `{0}`")]
    UnknownEntityType(String),
    #[error("entity map key `{0}` is not a number")]
    InvalidEntityKey(String),
    #[error("invalid answer content: {0}")]
    Invalid(#[from] InvariantError),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json {
            reason: err.to_string(),
        }
    }
}
