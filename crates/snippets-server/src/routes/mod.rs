//! Route definitions for the HTTP API.

pub mod health;
pub mod root;
pub mod snippets;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(root::routes())
        .merge(snippets::routes())
        .merge(users::routes())
        .with_state(state)
}
