use reqwest::StatusCode;
use serde::Deserialize;
use temple_admin_api::{ConflictKind, FieldError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Resubmit after refreshing the receipt preview.
    #[error("{kind}")]
    Conflict {
        kind: ConflictKind,
        /// Fresh receipt preview fetched after the conflict, when one applies
        next_receipt: Option<String>,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Backend offline: {0}")]
    BackendOffline(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Session storage: {0}")]
    Storage(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Error body returned by the server.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    details: Vec<FieldError>,
}

impl ClientError {
    /// Maps a non-success response to the matching variant.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = if parsed.error.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            parsed.error
        };
        match status {
            StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(parsed.details),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::InvalidState(message),
            StatusCode::CONFLICT => match ConflictKind::from_message(&message) {
                Some(kind) => ClientError::Conflict {
                    kind,
                    next_receipt: None,
                },
                None => ClientError::Server {
                    status: status.as_u16(),
                    message,
                },
            },
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict { .. })
    }
}
