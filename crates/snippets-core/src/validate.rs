//! Field validation for client-supplied snippet payloads.
//!
//! `validate_snippet` turns a raw JSON object into `SnippetFields`, or into a
//! `FieldErrors` map listing every problem found. When a current record is
//! supplied, fields missing from the payload keep their stored value.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{Language, SnippetFields, Style};

/// Maximum title length, in characters.
pub const TITLE_MAX_LENGTH: usize = 100;

/// Maximum code length, in characters. Bounds highlighting time and the
/// size of the stored HTML.
pub const CODE_MAX_LENGTH: usize = 100_000;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_A_BOOLEAN: &str = "Must be a valid boolean.";

/// Per-field validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error map holding a single message under `non_field_errors`.
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

/// Validate a snippet payload.
///
/// With `current = None` the payload describes a new snippet and `code` is
/// required. With `current = Some(..)` every absent field falls back to the
/// stored value. Read-only and unknown keys are ignored.
pub fn validate_snippet(
    input: &Map<String, Value>,
    current: Option<&SnippetFields>,
) -> Result<SnippetFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = match input.get("title") {
        None => current.map(|c| c.title.clone()).unwrap_or_default(),
        Some(value) => match string_value(value) {
            Ok(s) => {
                let s = s.trim().to_string();
                if s.chars().count() > TITLE_MAX_LENGTH {
                    errors.add(
                        "title",
                        format!("Ensure this field has no more than {TITLE_MAX_LENGTH} characters."),
                    );
                }
                s
            }
            Err(msg) => {
                errors.add("title", msg);
                String::new()
            }
        },
    };

    let code = match (input.get("code"), current) {
        (None, Some(c)) => c.code.clone(),
        (None, None) => {
            errors.add("code", REQUIRED);
            String::new()
        }
        (Some(value), _) => match string_value(value) {
            Ok(s) if s.trim().is_empty() => {
                errors.add("code", NOT_BLANK);
                String::new()
            }
            Ok(s) if s.chars().count() > CODE_MAX_LENGTH => {
                errors.add(
                    "code",
                    format!("Ensure this field has no more than {CODE_MAX_LENGTH} characters."),
                );
                String::new()
            }
            Ok(s) => s,
            Err(msg) => {
                errors.add("code", msg);
                String::new()
            }
        },
    };

    let linenos = match input.get("linenos") {
        None => current.map(|c| c.linenos).unwrap_or(false),
        Some(value) => bool_value(value).unwrap_or_else(|msg| {
            errors.add("linenos", msg);
            false
        }),
    };

    let language = match input.get("language") {
        None => current.map(|c| c.language).unwrap_or_default(),
        Some(value) => choice_value::<Language>(value).unwrap_or_else(|msg| {
            errors.add("language", msg);
            Language::default()
        }),
    };

    let style = match input.get("style") {
        None => current.map(|c| c.style).unwrap_or_default(),
        Some(value) => choice_value::<Style>(value).unwrap_or_else(|msg| {
            errors.add("style", msg);
            Style::default()
        }),
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SnippetFields {
        title,
        code,
        linenos,
        language,
        style,
    })
}

/// Strings pass through; numbers are accepted in their decimal form.
fn string_value(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(NOT_NULL),
        _ => Err(NOT_A_STRING),
    }
}

fn bool_value(value: &Value) -> Result<bool, &'static str> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(NOT_A_BOOLEAN),
        },
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(NOT_A_BOOLEAN),
        },
        Value::Null => Err(NOT_NULL),
        _ => Err(NOT_A_BOOLEAN),
    }
}

fn choice_value<T>(value: &Value) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match value {
        Value::String(s) => s.parse::<T>().map_err(|e| e.to_string()),
        Value::Null => Err(NOT_NULL.to_string()),
        other => Err(format!("\"{other}\" is not a valid choice.")),
    }
}
