//! API root: links to the top-level collections.

use axum::{Router, routing::get};
use serde::Serialize;

use crate::extract::Links;
use crate::negotiate::{Format, Negotiated, describe};
use crate::state::AppState;

/// Response for GET /.
#[derive(Debug, Serialize)]
pub struct ApiRoot {
    pub users: String,
    pub snippets: String,
}

impl ApiRoot {
    pub fn new(links: &Links) -> Self {
        Self {
            users: links.users(),
            snippets: links.snippets(),
        }
    }
}

/// GET / - Absolute URLs of the snippet and user collections.
async fn api_root(links: Links, format: Format) -> Negotiated<ApiRoot> {
    Negotiated::ok(format, "Api Root", ApiRoot::new(&links))
}

/// Build root routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(api_root).options(|format: Format| async move {
            describe(format, "Api Root", "GET, HEAD, OPTIONS")
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_each_collection_to_its_own_url() {
        let root = ApiRoot::new(&Links::new("http://api.test"));
        assert_eq!(root.users, "http://api.test/users/");
        assert_eq!(root.snippets, "http://api.test/snippets/");
    }
}
