//! Snippet routes.
//!
//! This module implements the snippet endpoints:
//! - GET /snippets/ - List every snippet
//! - POST /snippets/ - Create a snippet owned by the requester
//! - GET /snippets/{id}/ - Fetch one snippet
//! - PUT, PATCH /snippets/{id}/ - Update a snippet (owner only)
//! - DELETE /snippets/{id}/ - Delete a snippet (owner only)
//! - GET /snippets/{id}/highlight/ - Rendered HTML of a snippet
//!
//! Every route also answers OPTIONS with its allowed methods.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use snippets_core::{
    Decision, SnippetFields, SnippetId, authorize, authorize_collection,
    permissions::{ITEM_POLICIES, check_request},
    render_highlighted, validate_snippet,
};

use crate::error::{ApiError, ApiResult};
use crate::extract::{Links, Requester, json_object};
use crate::negotiate::{Format, Negotiated, describe};
use crate::repr::SnippetRepr;
use crate::state::AppState;

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a path id; anything that is not an integer is treated as missing.
pub(crate) fn parse_id<T: std::str::FromStr>(raw: &str) -> ApiResult<T> {
    raw.parse().map_err(|_| ApiError::not_found())
}

/// Render the highlighted page on the blocking pool.
///
/// Returns the fields alongside the markup so the caller can persist both.
async fn highlight(fields: SnippetFields) -> ApiResult<(SnippetFields, String)> {
    let rendered = tokio::task::spawn_blocking(move || {
        render_highlighted(&fields).map(|html| (fields, html))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("highlight task failed: {e}")))?;
    rendered.map_err(ApiError::from)
}

fn enforce(decision: Decision) -> ApiResult<()> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::Deny(denial) => Err(denial.into()),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /snippets/ - List every snippet in creation order.
async fn list_snippets(
    State(state): State<AppState>,
    links: Links,
    format: Format,
) -> ApiResult<Negotiated<Vec<SnippetRepr>>> {
    let snippets = state.store().list_snippets().await?;
    let body = snippets
        .iter()
        .map(|s| SnippetRepr::new(s, &links))
        .collect();
    Ok(Negotiated::ok(format, "Snippet List", body))
}

/// POST /snippets/ - Create a snippet.
///
/// The owner is always the requester; an `owner` key in the body is ignored.
///
/// # Response
///
/// 201 with the new snippet and a `Location` header.
async fn create_snippet(
    State(state): State<AppState>,
    requester: Requester,
    links: Links,
    format: Format,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    enforce(authorize_collection(&Method::POST, requester.user_id()))?;

    let input = json_object(&body)?;
    let (fields, highlighted) = highlight(validate_snippet(&input, None)?).await?;

    let snippet = state
        .store()
        .insert_snippet(&fields, &highlighted, requester.user_id())
        .await?;

    tracing::info!(
        snippet_id = %snippet.id,
        owner = snippet.owner_username().unwrap_or_default(),
        "Created snippet"
    );

    let location = links.snippet(snippet.id);
    let body = Negotiated::ok(format, "Snippet List", SnippetRepr::new(&snippet, &links))
        .with_status(StatusCode::CREATED);
    Ok(([(header::LOCATION, location)], body))
}

/// GET /snippets/{id}/ - Fetch one snippet.
async fn retrieve_snippet(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    links: Links,
    format: Format,
) -> ApiResult<Negotiated<SnippetRepr>> {
    let id: SnippetId = parse_id(&raw_id)?;
    let snippet = state.store().get_snippet(id).await?;
    Ok(Negotiated::ok(
        format,
        "Snippet Instance",
        SnippetRepr::new(&snippet, &links),
    ))
}

/// PUT or PATCH /snippets/{id}/ - Update a snippet.
///
/// Both verbs merge the body over the stored fields: absent fields keep
/// their current value. The highlight is re-rendered before saving.
async fn update_snippet(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    method: Method,
    requester: Requester,
    links: Links,
    format: Format,
    body: Bytes,
) -> ApiResult<Negotiated<SnippetRepr>> {
    enforce(check_request(ITEM_POLICIES, &method, requester.user_id()))?;

    let id: SnippetId = parse_id(&raw_id)?;
    let current = state.store().get_snippet(id).await?;
    enforce(authorize(&method, &current, requester.user_id()))?;

    let input = json_object(&body)?;
    let (fields, highlighted) =
        highlight(validate_snippet(&input, Some(&current.fields))?).await?;

    let snippet = state
        .store()
        .update_snippet(id, &fields, &highlighted)
        .await?;

    tracing::info!(snippet_id = %id, method = %method, "Updated snippet");

    Ok(Negotiated::ok(
        format,
        "Snippet Instance",
        SnippetRepr::new(&snippet, &links),
    ))
}

/// DELETE /snippets/{id}/ - Delete a snippet.
///
/// # Response
///
/// 204 with an empty body.
async fn delete_snippet(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    requester: Requester,
) -> ApiResult<StatusCode> {
    enforce(check_request(
        ITEM_POLICIES,
        &Method::DELETE,
        requester.user_id(),
    ))?;

    let id: SnippetId = parse_id(&raw_id)?;
    let current = state.store().get_snippet(id).await?;
    enforce(authorize(&Method::DELETE, &current, requester.user_id()))?;

    state.store().delete_snippet(id).await?;
    tracing::info!(snippet_id = %id, "Deleted snippet");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /snippets/{id}/highlight/ - The stored highlighted HTML document.
///
/// Always HTML, whatever the requested format.
async fn snippet_highlight(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Html<String>> {
    let id: SnippetId = parse_id(&raw_id)?;
    let snippet = state.store().get_snippet(id).await?;
    Ok(Html(snippet.highlighted))
}

const COLLECTION_ALLOW: &str = "GET, HEAD, POST, OPTIONS";
const ITEM_ALLOW: &str = "GET, HEAD, PUT, PATCH, DELETE, OPTIONS";
const HIGHLIGHT_ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build snippet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/snippets/",
            get(list_snippets)
                .post(create_snippet)
                .options(|format: Format| async move {
                    describe(format, "Snippet List", COLLECTION_ALLOW)
                }),
        )
        .route(
            "/snippets/{id}/",
            get(retrieve_snippet)
                .put(update_snippet)
                .patch(update_snippet)
                .delete(delete_snippet)
                .options(|format: Format| async move {
                    describe(format, "Snippet Instance", ITEM_ALLOW)
                }),
        )
        .route(
            "/snippets/{id}/highlight/",
            get(snippet_highlight).options(|format: Format| async move {
                describe(format, "Snippet Highlight", HIGHLIGHT_ALLOW)
            }),
        )
}

// ============================================================================
// Tests
// ============================================================================
