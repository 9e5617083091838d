//! Error types for the cardstmt-core library.

use thiserror::Error;

/// Fallback shown when the service rejects a request without an `error` field.
pub const SERVER_ERROR_MESSAGE: &str = "Server error.";

/// Fallback shown for transport failures and malformed responses.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Main error type for the cardstmt library.
#[derive(Error, Debug)]
pub enum CardstmtError {
    /// Local file validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The parsing service could not produce a record.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejection of a candidate file before any network call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Manual picker produced no file or a non-PDF file.
    #[error("Please select a valid PDF file.")]
    InvalidSelection,

    /// Drop gesture carried no file or a non-PDF file.
    #[error("Please drop a valid PDF file.")]
    InvalidDrop,
}

/// Parse triggered in a state that cannot issue a request.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    /// No candidate file is installed.
    #[error("Please select a file first.")]
    NoFile,
}

/// Failures of a single request against the parsing service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Non-2xx status. `message` is what the user sees.
    #[error("service rejected the document ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network failure before a response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// 2xx response whose body is not a JSON object.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The candidate's content could not be read for upload.
    #[error("failed to read file: {0}")]
    Read(String),
}

impl ServiceError {
    /// Build a rejection from a status and an optional service-provided message.
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected {
            status,
            message: message.unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string()),
        }
    }

    /// Human-readable message for the Failed state.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::MalformedResponse(_) | Self::Read(_) => {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Result type for the cardstmt library.
pub type Result<T> = std::result::Result<T, CardstmtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::InvalidSelection.to_string(),
            "Please select a valid PDF file."
        );
        assert_eq!(
            ValidationError::InvalidDrop.to_string(),
            "Please drop a valid PDF file."
        );
        assert_eq!(PreconditionError::NoFile.to_string(), "Please select a file first.");
    }

    #[test]
    fn test_user_message_fallbacks() {
        assert_eq!(ServiceError::rejected(500, None).user_message(), "Server error.");
        assert_eq!(
            ServiceError::rejected(422, Some("Unsupported document".into())).user_message(),
            "Unsupported document"
        );
        assert_eq!(
            ServiceError::Transport("connection refused".into()).user_message(),
            "An unexpected error occurred."
        );
        assert_eq!(
            ServiceError::MalformedResponse("expected value".into()).user_message(),
            "An unexpected error occurred."
        );
    }
}
