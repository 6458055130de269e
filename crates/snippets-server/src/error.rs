//! API error types with JSON responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snippets_core::{Denial, FieldErrors, HighlightError};
use snippets_store::StoreError;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Payload failed field validation (400).
    #[error("invalid input: {0}")]
    Validation(FieldErrors),

    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Unauthorized (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Forbidden (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Highlighter failure (500).
    #[error("highlight error: {0}")]
    Highlight(#[from] HighlightError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) | Self::Highlight(_) => "INTERNAL_ERROR",
            Self::Store(e) if is_not_found(e) => "NOT_FOUND",
            Self::Store(_) => "STORAGE_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) | Self::Highlight(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) if is_not_found(e) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The 404 returned for any unknown or unparseable record id.
    pub fn not_found() -> Self {
        Self::NotFound("No record matches the given query.".to_string())
    }
}

fn is_not_found(e: &StoreError) -> bool {
    matches!(
        e,
        StoreError::SnippetNotFound(_) | StoreError::UserNotFound(_)
    )
}

impl From<Denial> for ApiError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::NotAuthenticated => ApiError::Unauthorized(
                "Authentication credentials were not provided.".to_string(),
            ),
            Denial::NotOwner => ApiError::Forbidden(
                "You do not have permission to perform this action.".to_string(),
            ),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let code = self.code().to_string();
        let message = self.to_string();
        let unauthorized = matches!(self, ApiError::Unauthorized(_));
        let fields = match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                fields,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use snippets_core::SnippetId;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(FieldErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Denial::NotAuthenticated).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(Denial::NotOwner).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::SnippetNotFound(SnippetId(3)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");

        let err = ApiError::from(StoreError::MigrationError("boom".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_unauthorized_sets_challenge_header() {
        let response = ApiError::Unauthorized("no".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_validation_body_carries_fields() {
        let mut errors = FieldErrors::new();
        errors.add("code", "This field is required.");
        let body = ErrorResponse {
            error: ErrorDetails {
                code: "VALIDATION_ERROR".into(),
                message: "invalid".into(),
                fields: Some(errors),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["error"]["fields"]["code"][0],
            "This field is required."
        );

        let body = ErrorResponse {
            error: ErrorDetails {
                code: "NOT_FOUND".into(),
                message: "missing".into(),
                fields: None,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["error"].get("fields").is_none());
    }
}
