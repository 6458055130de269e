//! Domain layer for the snippets API.
//!
//! Holds the record types, payload validation, ownership policies and the
//! highlighter. Nothing here touches the network or the database.

pub mod highlight;
pub mod permissions;
pub mod types;
pub mod validate;

pub use highlight::{HighlightError, render as render_highlighted};
pub use permissions::{Decision, Denial, Owned, Policy, authorize, authorize_collection};
pub use types::{
    InvalidChoice, Language, Owner, Snippet, SnippetFields, SnippetId, Style, User, UserId,
};
pub use validate::{CODE_MAX_LENGTH, FieldErrors, TITLE_MAX_LENGTH, validate_snippet};
