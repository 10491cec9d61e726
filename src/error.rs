//! Client error types
//!
//! Every failure the dashboard can hit, grouped the way it is shown to the
//! user: validation problems, file problems, network failures and server
//! responses.

use thiserror::Error;

/// Generic message for failures that never reached the server
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Errors surfaced by client operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Client-side validation blocked the request
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Photo could not be attached
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Request never reached the server or no response came back
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// A 2xx response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text for the toast shown to the user
    ///
    /// Server messages are passed through verbatim; network and decode
    /// failures fall back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::File(e) => e.to_string(),
            ClientError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Server { .. } | ClientError::Decode(_) | ClientError::Network(_) => {
                fallback.to_string()
            }
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}

/// Form validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an issue type")]
    MissingIssueType,

    #[error("Please provide a description")]
    MissingDescription,

    #[error("A report is already being submitted")]
    SubmissionInFlight,

    #[error("Photo is still loading, please wait")]
    PhotoLoading,
}

/// Photo selection failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File size must be less than {}MB", .limit / (1024 * 1024))]
    TooLarge { size: u64, limit: u64 },

    #[error("Only JPG and PNG files are allowed")]
    UnsupportedType(String),

    #[error("Failed to read file")]
    Unreadable(String),
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
