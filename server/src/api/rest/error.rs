//! Error handling for REST API
//!
//! Provides the `AppError` type used across all REST endpoints. Every variant
//! renders as an envelope with an empty `data` object and a fresh request id.

use crate::auth::AuthError;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use super::envelope::Envelope;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Unauthorized(#[from] AuthError),
    #[error("{0}")]
    NotFound(String),
    #[error("method not allowed")]
    MethodNotAllowed,
    /// A framework rejection that carries its own status, e.g. 413.
    #[error("{message}")]
    Rejected { code: u16, message: String },
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Validation failure for a required field that is absent or empty.
    pub fn missing(fields: &str) -> Self {
        AppError::BadRequest(format!("invalid request: {} is required", fields))
    }

    pub fn code(&self) -> u16 {
        match self {
            AppError::BadRequest(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::NotFound(_) => 404,
            AppError::MethodNotAllowed => 405,
            AppError::Rejected { code, .. } => *code,
            AppError::Internal(_) => 500,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Internal(details) => {
                // Log full details server-side, return generic message to client
                tracing::error!(details = %details, "Internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        Envelope::error(self.code(), message).into_response()
    }
}
