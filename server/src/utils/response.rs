use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use evently_core::{ApiFailure, ApiSuccess, FieldError};
use serde::Serialize;

pub fn success<T>(data: T) -> Response
where
    T: Serialize,
{
    (StatusCode::OK, Json(ApiSuccess::new(data, None))).into_response()
}

pub fn success_with_message<T>(data: T, message: impl Into<String>, status: StatusCode) -> Response
where
    T: Serialize,
{
    (status, Json(ApiSuccess::new(data, Some(message.into())))).into_response()
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Vec<FieldError>>,
    status: StatusCode,
) -> Response {
    (status, Json(ApiFailure::new(code, message, details))).into_response()
}
