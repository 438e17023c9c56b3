use reqwest::StatusCode;

use crate::models::UserId;

/// Client-level errors
///
/// Every variant is surfaced to the user as text. None are retried and none
/// are fatal to the process.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// The input could not be parsed as a user id; no request was made.
    #[error("Please enter a valid numeric User ID.")]
    InvalidUserId(String),

    /// The backend does not know this user (HTTP 404).
    #[error("User ID {0} not found in model data.")]
    NotFound(UserId),

    /// The backend's model is not loaded (HTTP 503).
    #[error("API Service Unavailable: Model failed to load.")]
    ServiceUnavailable,

    /// Any other non-success status from the backend.
    #[error("API failed with status {}", .0.as_u16())]
    UnexpectedStatus(StatusCode),

    /// Connection, TLS or body decoding failure.
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl AppError {
    /// The text shown in the error banner
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidUserId(_) | AppError::NotFound(_) | AppError::ServiceUnavailable => {
                self.to_string()
            }
            AppError::UnexpectedStatus(_) | AppError::Transport(_) => format!(
                "Failed to connect or fetch data: {}. Check the client logs.",
                self
            ),
        }
    }

    /// Whether the failure means "no results" rather than a broken request
    pub fn is_empty_result(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
