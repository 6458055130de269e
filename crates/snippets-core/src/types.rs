//! Core data types for the snippets API.
//!
//! This module defines the records the rest of the workspace passes around:
//!
//! - `Snippet`: a stored code fragment with display metadata and its
//!   pre-rendered highlighted markup
//! - `User`: an identity mirrored from the identity provider, together with
//!   the ids of the snippets it owns
//! - `Language` / `Style`: the closed sets of accepted highlight options
//!
//! Identifiers are store-assigned integers wrapped in newtypes so snippet and
//! user ids cannot be mixed up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ============================================================================
// ID Types
// ============================================================================

/// Identifier of a stored snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(pub i64);

impl SnippetId {
    /// Returns the raw store identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SnippetId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Returns the raw store identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// ============================================================================
// Choice Types
// ============================================================================

/// Error returned when a wire name is not one of the accepted choices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidChoice(pub String);

/// Supported snippet languages.
///
/// Serialized as the lower-case wire name (`"python"`, `"rust"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Bash,
    C,
    Cpp,
    Csharp,
    Css,
    Go,
    Haskell,
    Html,
    Java,
    Js,
    Json,
    Lua,
    Makefile,
    Markdown,
    Perl,
    Php,
    #[default]
    Python,
    Ruby,
    Rust,
    Scala,
    Sql,
    Text,
    Xml,
    Yaml,
}

impl Language {
    /// Every accepted language, in wire-name order.
    pub const ALL: [Language; 24] = [
        Language::Bash,
        Language::C,
        Language::Cpp,
        Language::Csharp,
        Language::Css,
        Language::Go,
        Language::Haskell,
        Language::Html,
        Language::Java,
        Language::Js,
        Language::Json,
        Language::Lua,
        Language::Makefile,
        Language::Markdown,
        Language::Perl,
        Language::Php,
        Language::Python,
        Language::Ruby,
        Language::Rust,
        Language::Scala,
        Language::Sql,
        Language::Text,
        Language::Xml,
        Language::Yaml,
    ];

    /// Wire name of the language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Language::Bash => "bash",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Csharp => "csharp",
            Language::Css => "css",
            Language::Go => "go",
            Language::Haskell => "haskell",
            Language::Html => "html",
            Language::Java => "java",
            Language::Js => "js",
            Language::Json => "json",
            Language::Lua => "lua",
            Language::Makefile => "makefile",
            Language::Markdown => "markdown",
            Language::Perl => "perl",
            Language::Php => "php",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Scala => "scala",
            Language::Sql => "sql",
            Language::Text => "text",
            Language::Xml => "xml",
            Language::Yaml => "yaml",
        }
    }

    /// File extension used to look up the syntax definition.
    ///
    /// `None` means plain text.
    #[must_use]
    pub const fn syntax_token(self) -> Option<&'static str> {
        match self {
            Language::Bash => Some("sh"),
            Language::C => Some("c"),
            Language::Cpp => Some("cpp"),
            Language::Csharp => Some("cs"),
            Language::Css => Some("css"),
            Language::Go => Some("go"),
            Language::Haskell => Some("hs"),
            Language::Html => Some("html"),
            Language::Java => Some("java"),
            Language::Js => Some("js"),
            Language::Json => Some("json"),
            Language::Lua => Some("lua"),
            Language::Makefile => Some("mk"),
            Language::Markdown => Some("md"),
            Language::Perl => Some("pl"),
            Language::Php => Some("php"),
            Language::Python => Some("py"),
            Language::Ruby => Some("rb"),
            Language::Rust => Some("rs"),
            Language::Scala => Some("scala"),
            Language::Sql => Some("sql"),
            Language::Text => None,
            Language::Xml => Some("xml"),
            Language::Yaml => Some("yaml"),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

/// Supported highlight themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    #[default]
    Friendly,
    Github,
    SolarizedDark,
    SolarizedLight,
    OceanDark,
    Eighties,
    Mocha,
}

impl Style {
    /// Every accepted style, in wire-name order.
    pub const ALL: [Style; 7] = [
        Style::Friendly,
        Style::Github,
        Style::SolarizedDark,
        Style::SolarizedLight,
        Style::OceanDark,
        Style::Eighties,
        Style::Mocha,
    ];

    /// Wire name of the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Style::Friendly => "friendly",
            Style::Github => "github",
            Style::SolarizedDark => "solarized-dark",
            Style::SolarizedLight => "solarized-light",
            Style::OceanDark => "ocean-dark",
            Style::Eighties => "eighties",
            Style::Mocha => "mocha",
        }
    }

    /// Name of the bundled highlighter theme backing this style.
    #[must_use]
    pub const fn theme_name(self) -> &'static str {
        match self {
            Style::Friendly => "base16-ocean.light",
            Style::Github => "InspiredGitHub",
            Style::SolarizedDark => "Solarized (dark)",
            Style::SolarizedLight => "Solarized (light)",
            Style::OceanDark => "base16-ocean.dark",
            Style::Eighties => "base16-eighties.dark",
            Style::Mocha => "base16-mocha.dark",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

// ============================================================================
// Records
// ============================================================================

/// The client-writable fields of a snippet, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnippetFields {
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: Language,
    pub style: Style,
}

/// Owner reference carried by a stored snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: UserId,
    pub username: String,
}

/// A persisted snippet.
///
/// `owner` is `None` for snippets created before ownership was tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub created: DateTime<Utc>,
    pub fields: SnippetFields,
    pub owner: Option<Owner>,
    /// Full HTML document with the code rendered by the highlighter.
    pub highlighted: String,
}

impl Snippet {
    /// Id of the owning user, if any.
    pub fn owner_id(&self) -> Option<UserId> {
        self.owner.as_ref().map(|o| o.id)
    }

    /// Username of the owning user, if any.
    pub fn owner_username(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.username.as_str())
    }
}

/// A user together with the snippets it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Owned snippet ids, ascending.
    pub snippets: Vec<SnippetId>,
}
