//! Repository abstraction over snippet and user storage.
//!
//! The server holds an `Arc<dyn Repository>` so the PostgreSQL store and the
//! in-memory store are interchangeable.

use std::sync::Arc;

use async_trait::async_trait;
use snippets_core::{Snippet, SnippetFields, SnippetId, User, UserId};

use crate::error::StoreResult;

/// Storage operations needed by the API.
///
/// Snippets are listed in creation order; users in id order. The
/// `highlighted` markup is computed by the caller and stored as given.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_snippets(&self) -> StoreResult<Vec<Snippet>>;

    async fn get_snippet(&self, id: SnippetId) -> StoreResult<Snippet>;

    async fn insert_snippet(
        &self,
        fields: &SnippetFields,
        highlighted: &str,
        owner: Option<UserId>,
    ) -> StoreResult<Snippet>;

    /// Replace the writable fields of a snippet. Owner and creation time are kept.
    async fn update_snippet(
        &self,
        id: SnippetId,
        fields: &SnippetFields,
        highlighted: &str,
    ) -> StoreResult<Snippet>;

    async fn delete_snippet(&self, id: SnippetId) -> StoreResult<()>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn get_user(&self, id: UserId) -> StoreResult<User>;

    /// Id of the user with `username`, creating the user if needed.
    async fn ensure_user(&self, username: &str) -> StoreResult<UserId>;
}

#[async_trait]
impl<R> Repository for Arc<R>
where
    R: Repository + ?Sized,
{
    async fn list_snippets(&self) -> StoreResult<Vec<Snippet>> {
        (**self).list_snippets().await
    }

    async fn get_snippet(&self, id: SnippetId) -> StoreResult<Snippet> {
        (**self).get_snippet(id).await
    }

    async fn insert_snippet(
        &self,
        fields: &SnippetFields,
        highlighted: &str,
        owner: Option<UserId>,
    ) -> StoreResult<Snippet> {
        (**self).insert_snippet(fields, highlighted, owner).await
    }

    async fn update_snippet(
        &self,
        id: SnippetId,
        fields: &SnippetFields,
        highlighted: &str,
    ) -> StoreResult<Snippet> {
        (**self).update_snippet(id, fields, highlighted).await
    }

    async fn delete_snippet(&self, id: SnippetId) -> StoreResult<()> {
        (**self).delete_snippet(id).await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        (**self).list_users().await
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        (**self).get_user(id).await
    }

    async fn ensure_user(&self, username: &str) -> StoreResult<UserId> {
        (**self).ensure_user(username).await
    }
}
