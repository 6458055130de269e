//! snippets-server: HTTP API server for the snippets API
//!
//! This crate provides:
//! - REST endpoints for snippets and users
//! - Bearer token identity, with an optional development header
//! - Owner-based write permissions
//! - JSON or browsable HTML responses
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use snippets_server::{routes, AppState, ServerConfig};
//! use snippets_store::MemoryStore;
//!
//! let state = AppState::new(Arc::new(MemoryStore::new()), ServerConfig::default());
//! let app = routes::build_router(state);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod negotiate;
pub mod repr;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use snippets_core;
pub use snippets_store;
