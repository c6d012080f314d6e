use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use evently_core::{FieldError, ValidationErrors};
use thiserror::Error;
use tracing::{error, warn};

use crate::utils::response::error as error_response;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            AppError::DatabaseError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::Validation(errors) => {
                warn!(issues = errors.len(), "Validation failed");
            }
            AppError::InvalidBody(msg) => warn!(message = %msg, "Rejected request body"),
            AppError::NotFound(msg) => warn!(message = %msg, "Resource not found"),
            AppError::MethodNotAllowed(msg) => warn!(message = %msg, "Method not allowed"),
            AppError::DatabaseError(e) => error!(error = ?e, "Database error"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Internal failures never leak their cause to the client.
        let (message, details) = match self {
            AppError::Validation(errors) => {
                ("Validation failed".to_string(), Some(errors.into_errors()))
            }
            AppError::InvalidBody(msg) => (
                "Invalid request body".to_string(),
                Some(vec![FieldError::new("body", msg)]),
            ),
            AppError::NotFound(msg) => (msg, None),
            AppError::MethodNotAllowed(_) => ("Method not allowed".to_string(), None),
            AppError::DatabaseError(_) => ("An unexpected error occurred".to_string(), None),
        };

        error_response(code, message, details, status)
    }
}
