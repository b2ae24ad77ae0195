#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Load(#[from] fhyph::LoadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("pattern not found: {pattern}")]
    PatternNotFound { pattern: String },

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            Self::PatternNotFound { .. } => 3,
            Self::Load(fhyph::LoadError::Io(_)) | Self::Io(_) => 74,
            Self::Load(_) => 65,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_kind() {
        assert_eq!(CliError::invalid("x").exit_code(), 2);
        assert_eq!(
            CliError::PatternNotFound {
                pattern: "ab".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            CliError::from(fhyph::LoadError::syntax(3, "bad")).exit_code(),
            65
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::from(fhyph::LoadError::from(io)).exit_code(), 74);
    }

    #[test]
    fn load_errors_display_unwrapped() {
        let err = CliError::from(fhyph::LoadError::syntax(3, "bad"));
        assert_eq!(err.to_string(), "line 3: bad");
    }
}
