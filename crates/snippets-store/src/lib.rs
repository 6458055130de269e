//! snippets-store: Storage layer for the snippets API
//!
//! This crate provides:
//! - The `Repository` trait the server is written against
//! - `PgStore`, a PostgreSQL implementation using sqlx
//! - `MemoryStore`, an in-process implementation for tests and local runs
//! - Embedded schema migrations
//!
//! # Usage
//!
//! ```rust,ignore
//! use snippets_store::{PgStore, Repository, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = PgStore::connect(config).await?;
//!
//! let snippets = store.list_snippets().await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::Repository;
pub use store::{PgStore, StoreConfig};

// Re-export snippets-core for downstream crates
pub use snippets_core;
