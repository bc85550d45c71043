//! Client error handling
//!
//! Every failure the client can hit is one of these variants. Front-ends
//! render them with [`ClientError::user_message`].

use diabetes_risk_shared::{AuthError, ValidationError};
use reqwest::StatusCode;
use thiserror::Error;

/// Fallback shown when the server gives no usable message
pub const SERVER_ERROR_FALLBACK: &str = "Server error";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {}", .message.as_deref().unwrap_or(SERVER_ERROR_FALLBACK))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("A prediction is already being submitted")]
    SubmissionInFlight,
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err.user_message())
    }
}

impl ClientError {
    /// Text suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Auth(err) => err.to_string(),
            ClientError::Transport(err) => format!("Network error: {}", err),
            ClientError::Api { message, .. } => message
                .clone()
                .unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string()),
            ClientError::Decode(_) => SERVER_ERROR_FALLBACK.to_string(),
            ClientError::Io(err) => err.to_string(),
            ClientError::Csv(err) => err.to_string(),
            ClientError::SubmissionInFlight => self.to_string(),
        }
    }

    /// True for 401/403/422 responses, which mean the stored token is unusable
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ClientError::Api { status, .. }
                if matches!(
                    *status,
                    StatusCode::UNAUTHORIZED
                        | StatusCode::FORBIDDEN
                        | StatusCode::UNPROCESSABLE_ENTITY
                )
        )
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_falls_back_to_server_error() {
        let error = ClientError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(error.user_message(), "Server error");
    }

    #[test]
    fn test_api_error_uses_server_message() {
        let error = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("Glucose is required".to_string()),
        };
        assert_eq!(error.user_message(), "Glucose is required");
    }

    #[test]
    fn test_validation_error_conversion() {
        let error: ClientError = ValidationError::new("Height", "must be positive").into();
        assert_eq!(error.user_message(), "Height: must be positive");
    }

    #[test]
    fn test_unauthorized_statuses() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            let error = ClientError::Api { status, message: None };
            assert!(error.is_unauthorized());
        }
        let error = ClientError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert!(!error.is_unauthorized());
        assert!(!ClientError::SubmissionInFlight.is_unauthorized());
    }

    #[test]
    fn test_password_mismatch_message() {
        let error: ClientError = AuthError::PasswordMismatch.into();
        assert_eq!(error.user_message(), "Passwords do not match");
    }
}
