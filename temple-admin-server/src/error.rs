use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use temple_admin_api::ApiError;
use tracing::error;

/// HTTP face of [`ApiError`].
#[derive(Debug)]
pub struct AppError(pub ApiError);

pub type AppResult<T> = Result<T, AppError>;

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> Self {
        AppError(error)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ApiError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidState(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self.0 {
            ApiError::ValidationError(details) => json!({
                "error": "Validation failed",
                "details": details,
            }),
            ApiError::Conflict(kind) => json!({ "error": kind.message() }),
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => {
                error!(error = %self.0, "request failed");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temple_admin_api::{ConflictKind, FieldError};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::field("amount", "must be positive"), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::not_found("Shop", "x"), StatusCode::NOT_FOUND),
            (ApiError::Conflict(ConflictKind::DuplicateSubmission), StatusCode::CONFLICT),
            (ApiError::InvalidState("closed".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unauthorized("no token".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("viewer".into()), StatusCode::FORBIDDEN),
            (ApiError::DatabaseError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(AppError(error).status(), status);
        }
    }

    #[test]
    fn test_validation_response_carries_details() {
        let response = AppError(ApiError::ValidationError(vec![FieldError::new(
            "amount",
            "must be positive",
        )]))
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
