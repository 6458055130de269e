//! Request extractors: requester identity, JSON object bodies and link base.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use serde_json::{Map, Value};
use snippets_core::{FieldErrors, SnippetId, UserId};

use crate::auth::validate_token;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Header trusted as identity when `allow_dev_identity` is on.
pub const DEV_IDENTITY_HEADER: &str = "x-username";

/// Longest username the `users` table can hold.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Scheme reported by a TLS-terminating proxy.
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

// ============================================================================
// Identity
// ============================================================================

/// An authenticated user, mirrored into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
}

/// The requester of the current request; `None` when anonymous.
///
/// Resolution order:
/// 1. `Authorization: Bearer <jwt>`, HS256 with the configured secret. A
///    present but invalid token is rejected with 401.
/// 2. `X-Username`, only if `allow_dev_identity` is true in config.
/// 3. Otherwise anonymous.
#[derive(Debug, Clone, Default)]
pub struct Requester(pub Option<Identity>);

impl Requester {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.as_ref().map(|i| i.user_id)
    }
}

impl FromRequestParts<AppState> for Requester {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(username) = username_from_parts(parts, state.config())? else {
            return Ok(Requester(None));
        };

        let user_id = state.store().ensure_user(&username).await?;
        tracing::debug!(user_id = %user_id, username = %username, "resolved requester");

        Ok(Requester(Some(Identity { user_id, username })))
    }
}

/// Username carried by the request, if any.
fn username_from_parts(parts: &Parts, config: &ServerConfig) -> Result<Option<String>, ApiError> {
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header.to_str().map_err(|_| {
            ApiError::Unauthorized("Authorization header contains invalid characters".into())
        })?;

        let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must be Bearer <token>".into())
        })?;

        let claims = validate_token(token.trim(), &config.jwt_secret)?;
        if claims.sub.chars().count() > USERNAME_MAX_LENGTH {
            return Err(ApiError::Unauthorized(format!(
                "Token subject exceeds {USERNAME_MAX_LENGTH} characters"
            )));
        }
        return Ok(Some(claims.sub));
    }

    if !config.allow_dev_identity {
        return Ok(None);
    }

    let Some(header_value) = parts.headers.get(DEV_IDENTITY_HEADER) else {
        return Ok(None);
    };

    let username = header_value
        .to_str()
        .map_err(|_| {
            ApiError::BadRequest("X-Username header contains invalid characters".to_string())
        })?
        .trim();

    if username.is_empty() {
        return Err(ApiError::BadRequest("X-Username header is empty".to_string()));
    }
    if username.chars().count() > USERNAME_MAX_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "X-Username header exceeds {USERNAME_MAX_LENGTH} characters"
        )));
    }

    tracing::warn!(username, "Using dev identity from X-Username header");
    Ok(Some(username.to_string()))
}

// ============================================================================
// Request body
// ============================================================================

/// Parse a request body that must be a JSON object.
///
/// An empty body is an empty object, so a PATCH with no fields is a no-op.
/// Must run after the permission checks.
pub fn json_object(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::BadRequest(format!("JSON parse error - {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Validation(FieldErrors::non_field(format!(
            "Invalid data. Expected a dictionary, but got {}.",
            json_kind(&other)
        )))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Links
// ============================================================================

/// Builds absolute URLs for hyperlinked representations.
#[derive(Debug, Clone)]
pub struct Links {
    base: String,
}

impl Links {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn snippets(&self) -> String {
        format!("{}/snippets/", self.base)
    }

    pub fn snippet(&self, id: SnippetId) -> String {
        format!("{}/snippets/{}/", self.base, id)
    }

    pub fn snippet_highlight(&self, id: SnippetId) -> String {
        format!("{}/snippets/{}/highlight/", self.base, id)
    }

    pub fn users(&self) -> String {
        format!("{}/users/", self.base)
    }

    pub fn user(&self, id: UserId) -> String {
        format!("{}/users/{}/", self.base, id)
    }
}

impl FromRequestParts<AppState> for Links {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match &state.config().public_url {
            Some(public_url) => Ok(Links::new(public_url.as_str())),
            None => Ok(Links::new(request_base(parts))),
        }
    }
}

/// Base URL as seen by the client: `X-Forwarded-Proto` (when `http` or
/// `https`) and the `Host` header.
fn request_base(parts: &Parts) -> String {
    let scheme = parts
        .headers
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| v == "http" || v == "https")
        .unwrap_or_else(|| "http".to_string());

    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .or_else(|| parts.uri.authority().map(|a| a.as_str()))
        .unwrap_or("localhost");

    format!("{scheme}://{host}")
}
