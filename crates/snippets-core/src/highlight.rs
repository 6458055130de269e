//! Server-side rendering of snippet code to a standalone HTML document.
//!
//! Syntax definitions and themes are the ones bundled with syntect, loaded
//! once per process.

use std::fmt::Write as _;
use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::types::{Language, SnippetFields, Style};

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("highlighting failed: {0}")]
    Syntect(#[from] syntect::Error),

    #[error("theme not bundled: {0}")]
    MissingTheme(&'static str),

    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),
}

fn syntax_for(language: Language) -> &'static SyntaxReference {
    language
        .syntax_token()
        .and_then(|token| SYNTAXES.find_syntax_by_token(token))
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text())
}

fn theme_for(style: Style) -> Result<&'static Theme, HighlightError> {
    THEMES
        .themes
        .get(style.theme_name())
        .ok_or(HighlightError::MissingTheme(style.theme_name()))
}

/// HTML-escaping display wrapper, identical to syntect's `escape::Escape`
/// (which is private in syntect 5).
struct Escape<'a>(&'a str);

impl std::fmt::Display for Escape<'_> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Escape(s) = *self;
        let mut last = 0;
        for (i, ch) in s.bytes().enumerate() {
            let escaped = match ch {
                b'>' => "&gt;",
                b'<' => "&lt;",
                b'&' => "&amp;",
                b'\'' => "&#39;",
                b'"' => "&quot;",
                _ => continue,
            };
            fmt.write_str(&s[last..i])?;
            fmt.write_str(escaped)?;
            last = i + 1;
        }
        if last < s.len() {
            fmt.write_str(&s[last..])?;
        }
        Ok(())
    }
}

fn css_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    Escape(input).to_string()
}

/// Render the code of `fields` as a full HTML document.
///
/// The document title is the snippet title. When `linenos` is set the code
/// is laid out in a two-column table with line numbers on the left.
pub fn render(fields: &SnippetFields) -> Result<String, HighlightError> {
    let theme = theme_for(fields.style)?;
    let mut highlighter = HighlightLines::new(syntax_for(fields.language), theme);

    let mut lines = Vec::new();
    for line in LinesWithEndings::from(&fields.code) {
        let regions = highlighter.highlight_line(line, &SYNTAXES)?;
        lines.push(styled_line_to_highlighted_html(
            &regions[..],
            IncludeBackground::No,
        )?);
    }

    let background = theme
        .settings
        .background
        .map(css_color)
        .unwrap_or_else(|| "#ffffff".to_string());
    let foreground = theme
        .settings
        .foreground
        .map(css_color)
        .unwrap_or_else(|| "#000000".to_string());
    let title = Escape(&fields.title);

    let mut html = String::new();
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html>")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{title}</title>")?;
    writeln!(
        html,
        "<style>body {{ background: {background}; color: {foreground}; }} \
         .highlighttable td.linenos {{ opacity: 0.5; text-align: right; padding-right: 1em; }}</style>"
    )?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    if !fields.title.is_empty() {
        writeln!(html, "<h2>{title}</h2>")?;
    }

    let code: String = lines.concat();
    if fields.linenos {
        let numbers: Vec<String> = (1..=lines.len().max(1)).map(|n| n.to_string()).collect();
        writeln!(
            html,
            "<table class=\"highlighttable\"><tr><td class=\"linenos\"><pre>{}</pre></td>\
             <td class=\"code\"><div class=\"highlight\"><pre>{code}</pre></div></td></tr></table>",
            numbers.join("\n")
        )?;
    } else {
        writeln!(html, "<div class=\"highlight\"><pre>{code}</pre></div>")?;
    }

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}
