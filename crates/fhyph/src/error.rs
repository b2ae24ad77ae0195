#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Failure to construct a hyphenator.
///
/// Queries never fail; "no break point" is `None`, not an error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("pattern {pattern:?} needs {expected} values, got {found}")]
    PatternLength {
        pattern: String,
        expected: usize,
        found: usize,
    },

    #[error("pattern {pattern:?} has non-digit value {digit:?}")]
    InvalidDigit { pattern: String, digit: char },

    #[error("empty pattern")]
    EmptyPattern,

    #[error("key {key:?} contains a reserved character")]
    ReservedChar { key: String },

    #[cfg(feature = "persistence")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid compiled dictionary: {message}")]
    Format { message: String },
}

impl LoadError {
    #[must_use]
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}
