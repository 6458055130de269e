//! Database models for the storage layer.
//!
//! These types map directly to database rows and are used for
//! sqlx queries. They are separate from the domain types in
//! snippets-core so columns can stay plain strings and integers.

use chrono::{DateTime, Utc};
use snippets_core::{Owner, Snippet, SnippetFields, SnippetId, User, UserId};
use sqlx::FromRow;

use crate::error::StoreError;

/// Database row for the `snippets` table joined with its owner's username.
#[derive(Debug, Clone, FromRow)]
pub struct SnippetRow {
    pub id: i64,
    pub created: DateTime<Utc>,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
    pub owner_id: Option<i64>,
    /// From `users.username`; `None` when the snippet has no owner.
    pub owner_username: Option<String>,
    pub highlighted: String,
}

impl TryFrom<SnippetRow> for Snippet {
    type Error = StoreError;

    fn try_from(row: SnippetRow) -> Result<Self, Self::Error> {
        let owner = match (row.owner_id, row.owner_username) {
            (Some(id), Some(username)) => Some(Owner {
                id: UserId(id),
                username,
            }),
            _ => None,
        };

        Ok(Snippet {
            id: SnippetId(row.id),
            created: row.created,
            fields: SnippetFields {
                title: row.title,
                code: row.code,
                linenos: row.linenos,
                language: row.language.parse()?,
                style: row.style.parse()?,
            },
            owner,
            highlighted: row.highlighted,
        })
    }
}

/// Database row for the `users` table with the ids of owned snippets.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub snippet_ids: Vec<i64>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            username: row.username,
            snippets: row.snippet_ids.into_iter().map(SnippetId).collect(),
        }
    }
}
