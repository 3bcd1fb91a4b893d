use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Request-level error taxonomy.
///
/// `Unauthenticated` and `Forbidden` are distinct on purpose: a policy
/// denial must never be reported as a missing record or an invalid token.
/// Repository failures carry their source for logging but are rendered as a
/// generic message so store internals never leak to the caller.
#[derive(Debug)]
pub enum AppError {
    /// No credential, or one that failed verification.
    Unauthenticated(String),
    /// Authenticated, but the policy denies the operation.
    Forbidden(String),
    /// The addressed record does not exist (within the caller's visibility).
    NotFound(String),
    /// Malformed input to a create/update operation.
    Validation(String),
    /// Backing-store failure.
    Repository(anyhow::Error),
}

impl AppError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn repository<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Repository(err.into())
    }
}

/// JSON error body, also used by the OpenAPI document.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Repository(err) => {
                tracing::error!(error = ?err, "Repository failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            other => AppError::repository(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::validation(format!("Validation failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_the_taxonomy() {
        let cases = [
            (
                AppError::unauthenticated("no token"),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::forbidden("denied"), StatusCode::FORBIDDEN),
            (AppError::not_found("missing"), StatusCode::NOT_FOUND),
            (
                AppError::validation("bad input"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::repository(anyhow::anyhow!("connection reset")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
