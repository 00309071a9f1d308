//! Error types and HTTP mapping for the `TripPlanner` application

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the `TripPlanner` application
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Requested entity does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Login failed. Deliberately does not say which of email/password was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing or invalid session token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Database errors
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },

    /// General application errors
    #[error("Application error: {source}")]
    Internal {
        #[from]
        source: anyhow::Error,
    },
}

impl PlannerError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new upstream API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::Api {
            message: err.to_string(),
        }
    }
}

impl From<bcrypt::BcryptError> for PlannerError {
    fn from(err: bcrypt::BcryptError) -> Self {
        PlannerError::Internal {
            source: anyhow::Error::new(err),
        }
    }
}

/// JSON error envelope returned by every failing endpoint
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            PlannerError::Validation { message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: message.clone(),
                    error: None,
                },
            ),
            PlannerError::NotFound { message } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    message: message.clone(),
                    error: None,
                },
            ),
            PlannerError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Invalid email or password".to_string(),
                    error: None,
                },
            ),
            PlannerError::Unauthorized { message } => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    message: message.clone(),
                    error: None,
                },
            ),
            PlannerError::Api { .. }
            | PlannerError::Database { .. }
            | PlannerError::Internal { .. } => {
                tracing::error!("request failed: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "Internal Server Error".to_string(),
                        error: Some(self.to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let validation_err = PlannerError::validation("days must be positive");
        assert!(matches!(validation_err, PlannerError::Validation { .. }));

        let not_found_err = PlannerError::not_found("no such attraction");
        assert!(matches!(not_found_err, PlannerError::NotFound { .. }));

        let api_err = PlannerError::api("connection failed");
        assert!(matches!(api_err, PlannerError::Api { .. }));
    }

    #[test]
    fn test_status_mapping() {
        let resp = PlannerError::validation("bad").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = PlannerError::not_found("gone").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = PlannerError::InvalidCredentials.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = PlannerError::unauthorized("no token").into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = PlannerError::api("upstream down").into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_credentials_message_is_generic() {
        assert_eq!(
            PlannerError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }
}
