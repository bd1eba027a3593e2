use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

/// A single field-level validation failure, addressed by its JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Discriminates the two kinds of 409 responses. Clients treat both as
/// retryable after refreshing the receipt-number preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    DuplicateSubmission,
    ReceiptNumberExists,
}

impl ConflictKind {
    pub fn message(&self) -> &'static str {
        match self {
            ConflictKind::DuplicateSubmission => "Duplicate submission detected",
            ConflictKind::ReceiptNumberExists => "Receipt number already exists",
        }
    }

    pub fn from_message(message: &str) -> Option<Self> {
        match message {
            "Duplicate submission detected" => Some(ConflictKind::DuplicateSubmission),
            "Receipt number already exists" => Some(ConflictKind::ReceiptNumberExists),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {}", format_field_errors(.0))]
    ValidationError(Vec<FieldError>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(ConflictKind),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Shorthand for a validation error on a single field.
    pub fn field(path: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationError(vec![FieldError::new(path, message)])
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{entity} {id}"))
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.path, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::ValidationError(field_errors(&errors))
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ApiError {
    fn from(error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ApiError::DatabaseError(error.to_string())
    }
}

/// Flattens `validator` errors into `{path, message}` pairs sorted by path.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value ({})", err.code));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.message.cmp(&b.message)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{Validate, ValidationError};

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(custom(function = "always_fails"))]
        code: String,
    }

    fn always_fails(_value: &str) -> Result<(), ValidationError> {
        Err(ValidationError::new("bad_code"))
    }

    #[test]
    fn test_validation_errors_flatten_sorted() {
        let probe = Probe {
            name: String::new(),
            code: "x".to_string(),
        };
        let err: ApiError = probe.validate().unwrap_err().into();
        match err {
            ApiError::ValidationError(details) => {
                assert_eq!(details.len(), 2);
                assert_eq!(details[0].path, "code");
                assert_eq!(details[0].message, "invalid value (bad_code)");
                assert_eq!(details[1].path, "name");
                assert_eq!(details[1].message, "name is required");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_conflict_messages_round_trip() {
        for kind in [ConflictKind::DuplicateSubmission, ConflictKind::ReceiptNumberExists] {
            assert_eq!(ConflictKind::from_message(kind.message()), Some(kind));
        }
        assert_eq!(ConflictKind::from_message("other"), None);
    }
}
