use evently_core::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a failure envelope.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
        details: Vec<FieldError>,
    },

    #[error("response body is not a valid envelope: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response did not include data")]
    MissingData,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            ClientError::Decode(_) | ClientError::MissingData => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_validation(&self) -> bool {
        self.status() == Some(400)
    }

    /// Per-field messages from a validation failure; empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Api { details, .. } => details,
            _ => &[],
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
