//! Error types for nurseroster-io.

use thiserror::Error;

/// Raised while parsing an instance text file. Parsing is all-or-nothing:
/// the first malformed line aborts with its 1-based line number, never
/// producing a partial instance.
#[derive(Debug, Error)]
pub enum IoFormatError {
    #[error("line {line}: {reason}")]
    ParseError { line: usize, reason: String },
}

impl IoFormatError {
    pub fn at(line: usize, reason: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for nurseroster-io operations.
pub type Result<T> = std::result::Result<T, IoFormatError>;
