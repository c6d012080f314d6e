//! The uniform wrapper every API response is sent in.

use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

/// `{ "success": true, "data": ..., "message": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            data,
            message,
        }
    }
}

/// `{ "success": false, "error": ..., "code": ..., "details": [...] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiFailure {
    pub fn new(code: &str, error: impl Into<String>, details: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.to_string(),
            details,
        }
    }
}

/// Decode-side view accepting either envelope shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<FieldError>>,
}
