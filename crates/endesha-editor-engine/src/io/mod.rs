use crate::answer::AnswerRecord;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Record not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid answer record {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read an answer record stored as JSON
pub fn read_record(path: &Path) -> Result<AnswerRecord, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(IoError::Io)?;
    serde_json::from_str(&content).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an answer record as pretty-printed JSON
pub fn write_record(path: &Path, record: &AnswerRecord) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    let mut content = serde_json::to_string_pretty(record).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');
    fs::write(path, content).map_err(IoError::Io)
}
