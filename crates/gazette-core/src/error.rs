//! Error types for gazette operations.

use thiserror::Error;

/// Result type alias for gazette operations.
pub type GazetteResult<T> = Result<T, GazetteError>;

/// Main error type for all gazette operations.
///
/// Errors in this component are file-level: a document that cannot be read
/// or parsed produces one of these, the caller logs it, and the batch
/// continues. Nothing here aborts an integration run.
#[derive(Error, Debug)]
pub enum GazetteError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A document file could not be parsed into integration records.
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },
}

impl GazetteError {
    /// Create a parse error for a specific input file.
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
