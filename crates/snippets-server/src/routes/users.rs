//! Read-only user routes.
//!
//! - GET /users/ - List users with links to their snippets
//! - GET /users/{id}/ - Fetch one user

use axum::{
    Router,
    extract::{Path, State},
    routing::get,
};
use snippets_core::UserId;

use crate::error::ApiResult;
use crate::extract::Links;
use crate::negotiate::{Format, Negotiated, describe};
use crate::repr::UserRepr;
use crate::routes::snippets::parse_id;
use crate::state::AppState;

/// GET /users/ - List every user.
async fn list_users(
    State(state): State<AppState>,
    links: Links,
    format: Format,
) -> ApiResult<Negotiated<Vec<UserRepr>>> {
    let users = state.store().list_users().await?;
    let body = users.iter().map(|u| UserRepr::new(u, &links)).collect();
    Ok(Negotiated::ok(format, "User List", body))
}

/// GET /users/{id}/ - Fetch one user.
async fn retrieve_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    links: Links,
    format: Format,
) -> ApiResult<Negotiated<UserRepr>> {
    let id: UserId = parse_id(&raw_id)?;
    let user = state.store().get_user(id).await?;
    Ok(Negotiated::ok(
        format,
        "User Instance",
        UserRepr::new(&user, &links),
    ))
}

const READ_ONLY_ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/",
            get(list_users).options(|format: Format| async move {
                describe(format, "User List", READ_ONLY_ALLOW)
            }),
        )
        .route(
            "/users/{id}/",
            get(retrieve_user).options(|format: Format| async move {
                describe(format, "User Instance", READ_ONLY_ALLOW)
            }),
        )
}
