//! Response format negotiation: JSON or a browsable HTML page.
//!
//! `?format=json` and `?format=api` force a format; otherwise an `Accept`
//! header asking for `text/html` (and not `application/json`) gets HTML.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{FromRequestParts, Query},
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use snippets_core::highlight::escape_html;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Html,
}

impl Format {
    /// Pick a format from the query string and the `Accept` header.
    pub fn negotiate(query: Option<&str>, headers: &HeaderMap) -> Self {
        match query {
            Some("json") => return Format::Json,
            Some("api") | Some("html") => return Format::Html,
            _ => {}
        }

        let accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if accept.contains("text/html") && !accept.contains("application/json") {
            Format::Html
        } else {
            Format::Json
        }
    }
}

impl<S> FromRequestParts<S> for Format
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();
        Ok(Format::negotiate(
            query.get("format").map(String::as_str),
            &parts.headers,
        ))
    }
}

/// A serializable body rendered in the negotiated format.
#[derive(Debug)]
pub struct Negotiated<T> {
    pub format: Format,
    pub status: StatusCode,
    /// Page heading for the HTML rendering.
    pub name: &'static str,
    pub body: T,
}

impl<T> Negotiated<T> {
    pub fn ok(format: Format, name: &'static str, body: T) -> Self {
        Self {
            format,
            status: StatusCode::OK,
            name,
            body,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.format {
            Format::Json => (self.status, Json(self.body)).into_response(),
            Format::Html => match serde_json::to_string_pretty(&self.body) {
                Ok(pretty) => (self.status, Html(render_page(self.name, self.status, &pretty)))
                    .into_response(),
                Err(e) => ApiError::Internal(format!("Failed to render page: {e}")).into_response(),
            },
        }
    }
}

/// Media types every resource can be rendered as.
pub const RENDERS: [&str; 2] = ["application/json", "text/html"];

/// Media types every resource accepts in a request body.
pub const PARSES: [&str; 1] = ["application/json"];

/// Body of an OPTIONS response.
#[derive(Debug, Serialize)]
pub struct ResourceMetadata {
    pub name: &'static str,
    pub renders: [&'static str; 2],
    pub parses: [&'static str; 1],
}

/// Answer an OPTIONS request: 200, the `Allow` header and a short
/// description of the resource.
pub fn describe(format: Format, name: &'static str, allow: &'static str) -> Response {
    let metadata = ResourceMetadata {
        name,
        renders: RENDERS,
        parses: PARSES,
    };
    (
        [(header::ALLOW, allow)],
        Negotiated::ok(format, name, metadata),
    )
        .into_response()
}

fn render_page(name: &str, status: StatusCode, json: &str) -> String {
    let name = escape_html(name);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{name}</title>\n</head>\n\
         <body>\n<h1>{name}</h1>\n<p><b>HTTP {status}</b></p>\n<pre class=\"response\">{body}</pre>\n\
         <p><a href=\"?format=json\">json</a></p>\n</body>\n</html>\n",
        body = escape_html(json),
    )
}
