use axum::http::{Method, Uri};
use axum::response::Response;
use serde::Serialize;
use tracing::debug;

use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod events;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    success(HealthPayload {
        status: "ok",
        service: "evently-api",
    })
}

pub const ROUTE_NOT_FOUND: &str = "Route not found";

pub async fn route_not_found(uri: Uri) -> AppError {
    debug!(path = %uri.path(), "No route matched");
    AppError::NotFound(ROUTE_NOT_FOUND.to_string())
}

/// The path exists but not for this verb.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{method} {}", uri.path()))
}
