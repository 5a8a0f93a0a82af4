//! Error types for pattern-ingest

use std::io;
use thiserror::Error;

/// Main error type for ingestion operations
#[derive(Debug, Error)]
pub enum IngestError {
    /// IO error occurred while opening or reading the input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid construction-time parameters
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input at a known line
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl IngestError {
    /// Build a parse error for the given 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        IngestError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Build a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        IngestError::Config(message.into())
    }
}

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

impl From<regex::Error> for IngestError {
    fn from(e: regex::Error) -> Self {
        IngestError::Config(format!("invalid layer pattern: {}", e))
    }
}
