//! In-memory repository for tests and database-less development.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use snippets_core::{Owner, Snippet, SnippetFields, SnippetId, User, UserId};

use crate::error::{StoreError, StoreResult};
use crate::repository::Repository;

#[derive(Debug, Default)]
struct Tables {
    snippets: BTreeMap<SnippetId, Snippet>,
    users: BTreeMap<UserId, String>,
    next_snippet: i64,
    next_user: i64,
}

impl Tables {
    fn owner(&self, id: UserId) -> StoreResult<Owner> {
        self.users
            .get(&id)
            .map(|username| Owner {
                id,
                username: username.clone(),
            })
            .ok_or(StoreError::UserNotFound(id))
    }

    fn find_user(&self, username: &str) -> Option<UserId> {
        self.users
            .iter()
            .find(|(_, name)| *name == username)
            .map(|(id, _)| *id)
    }

    fn user(&self, id: UserId, username: &str) -> User {
        User {
            id,
            username: username.to_string(),
            snippets: self
                .snippets
                .values()
                .filter(|s| s.owner_id() == Some(id))
                .map(|s| s.id)
                .collect(),
        }
    }
}

/// Repository backed by ordered maps behind a lock.
///
/// Ids start at 1 and are never reused, matching a database sequence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn list_snippets(&self) -> StoreResult<Vec<Snippet>> {
        // Ids are allocated in creation order, so id order is creation order.
        Ok(self.read()?.snippets.values().cloned().collect())
    }

    async fn get_snippet(&self, id: SnippetId) -> StoreResult<Snippet> {
        self.read()?
            .snippets
            .get(&id)
            .cloned()
            .ok_or(StoreError::SnippetNotFound(id))
    }

    async fn insert_snippet(
        &self,
        fields: &SnippetFields,
        highlighted: &str,
        owner: Option<UserId>,
    ) -> StoreResult<Snippet> {
        let mut tables = self.write()?;
        let owner = owner.map(|id| tables.owner(id)).transpose()?;

        tables.next_snippet += 1;
        let snippet = Snippet {
            id: SnippetId(tables.next_snippet),
            created: Utc::now(),
            fields: fields.clone(),
            owner,
            highlighted: highlighted.to_string(),
        };
        tables.snippets.insert(snippet.id, snippet.clone());
        Ok(snippet)
    }

    async fn update_snippet(
        &self,
        id: SnippetId,
        fields: &SnippetFields,
        highlighted: &str,
    ) -> StoreResult<Snippet> {
        let mut tables = self.write()?;
        let snippet = tables
            .snippets
            .get_mut(&id)
            .ok_or(StoreError::SnippetNotFound(id))?;
        snippet.fields = fields.clone();
        snippet.highlighted = highlighted.to_string();
        Ok(snippet.clone())
    }

    async fn delete_snippet(&self, id: SnippetId) -> StoreResult<()> {
        self.write()?
            .snippets
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::SnippetNotFound(id))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let tables = self.read()?;
        Ok(tables
            .users
            .iter()
            .map(|(id, username)| tables.user(*id, username))
            .collect())
    }

    async fn get_user(&self, id: UserId) -> StoreResult<User> {
        let tables = self.read()?;
        let username = tables.users.get(&id).ok_or(StoreError::UserNotFound(id))?;
        Ok(tables.user(id, username))
    }

    async fn ensure_user(&self, username: &str) -> StoreResult<UserId> {
        if let Some(id) = self.read()?.find_user(username) {
            return Ok(id);
        }

        let mut tables = self.write()?;
        if let Some(id) = tables.find_user(username) {
            return Ok(id);
        }
        tables.next_user += 1;
        let id = UserId(tables.next_user);
        tables.users.insert(id, username.to_string());
        tracing::debug!(user_id = %id, username, "created user");
        Ok(id)
    }
}
