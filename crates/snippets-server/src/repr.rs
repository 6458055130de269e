//! Hyperlinked wire representations of snippets and users.

use serde::Serialize;
use snippets_core::{Language, Snippet, SnippetId, Style, User, UserId};

use crate::extract::Links;

/// Snippet as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetRepr {
    pub url: String,
    pub id: SnippetId,
    pub highlight: String,
    /// Owner's username; `null` for ownerless snippets.
    pub owner: Option<String>,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

impl SnippetRepr {
    pub fn new(snippet: &Snippet, links: &Links) -> Self {
        Self {
            url: links.snippet(snippet.id),
            id: snippet.id,
            highlight: links.snippet_highlight(snippet.id),
            owner: snippet.owner_username().map(str::to_string),
            title: snippet.fields.title.clone(),
            code: snippet.fields.code.clone(),
            linenos: snippet.fields.linenos,
            language: snippet.fields.language,
            style: snippet.fields.style,
        }
    }
}

/// User as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct UserRepr {
    pub url: String,
    pub id: UserId,
    pub username: String,
    /// URLs of the snippets this user owns.
    pub snippets: Vec<String>,
}

impl UserRepr {
    pub fn new(user: &User, links: &Links) -> Self {
        Self {
            url: links.user(user.id),
            id: user.id,
            username: user.username.clone(),
            snippets: user.snippets.iter().map(|id| links.snippet(*id)).collect(),
        }
    }
}
