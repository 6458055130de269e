//! Subcommands and the shared HTTP/output plumbing they use.

pub mod create;
pub mod delete;
pub mod highlight;
pub mod list;
pub mod root;
pub mod show;
pub mod update;
pub mod users;

use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// Client
// ============================================================================

/// Build an HTTP client that sends `token` as a bearer credential.
pub fn build_client(token: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| anyhow!("token contains characters not allowed in a header"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(Client::builder().default_headers(headers).build()?)
}

/// Join the server base URL and an API path.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    code: String,
    message: String,
    #[serde(default)]
    fields: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Turn a non-success response into an error naming the server's reason.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => {
            let mut message = format!("{} ({}): {}", status, body.error.code, body.error.message);
            for (field, errors) in body.error.fields.unwrap_or_default() {
                message.push_str(&format!("\n  {}: {}", field, errors));
            }
            bail!(message)
        }
        Err(_) => bail!("{}: {}", status, text),
    }
}

/// Send a request and decode a JSON response.
pub async fn make_request<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = check(request.send().await?).await?;
    Ok(response.json().await?)
}

/// Send a request whose response body is ignored.
pub async fn send_empty(request: RequestBuilder) -> Result<()> {
    check(request.send().await?).await?;
    Ok(())
}

/// Send a request and return the response body as text.
pub async fn fetch_text(request: RequestBuilder) -> Result<String> {
    let response = check(request.send().await?).await?;
    Ok(response.text().await?)
}

// ============================================================================
// Output
// ============================================================================

/// Types that can print themselves for a person rather than a program.
pub trait HumanReadable {
    fn print_human(&self);
}

impl<T: HumanReadable> HumanReadable for Vec<T> {
    fn print_human(&self) {
        if self.is_empty() {
            println!("{}", "(none)".dimmed());
        }
        for item in self {
            item.print_human();
            println!();
        }
    }
}

/// Print as pretty JSON, or with `print_human` when `human` is set.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// Shared response types
// ============================================================================

/// A snippet as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct SnippetResponse {
    pub url: String,
    pub id: i64,
    pub highlight: String,
    pub owner: Option<String>,
    pub title: String,
    pub code: String,
    pub linenos: bool,
    pub language: String,
    pub style: String,
}

impl SnippetResponse {
    fn print_header(&self) {
        let title = if self.title.is_empty() {
            "(untitled)".dimmed().to_string()
        } else {
            self.title.bold().to_string()
        };
        println!("{} {}", format!("#{}", self.id).yellow().bold(), title);
        println!(
            "  {} {}  {} {}  {} {}",
            "Owner:".cyan(),
            self.owner.as_deref().unwrap_or("-"),
            "Language:".cyan(),
            self.language,
            "Style:".cyan(),
            self.style
        );
    }
}

impl HumanReadable for SnippetResponse {
    fn print_human(&self) {
        self.print_header();
        println!("  {} {}", "URL:".cyan(), self.url);
        println!("{}", "-".repeat(60));
        for (n, line) in self.code.lines().enumerate() {
            if self.linenos {
                println!("{:>4} {}", (n + 1).to_string().dimmed(), line);
            } else {
                println!("{}", line);
            }
        }
    }
}

/// A user as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct UserResponse {
    pub url: String,
    pub id: i64,
    pub username: String,
    pub snippets: Vec<String>,
}

impl HumanReadable for UserResponse {
    fn print_human(&self) {
        println!(
            "{} {}",
            format!("#{}", self.id).yellow().bold(),
            self.username.bold()
        );
        println!("  {} {}", "URL:".cyan(), self.url);
        println!("  {} {}", "Snippets:".cyan(), self.snippets.len());
        for url in &self.snippets {
            println!("    {}", url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("http://localhost:8000/", "/snippets/"),
            "http://localhost:8000/snippets/"
        );
        assert_eq!(endpoint("http://h", "/"), "http://h/");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long line of code", 10), "a long ...");
    }

    #[test]
    fn test_build_client_rejects_bad_token() {
        assert!(build_client(Some("ok-token")).is_ok());
        assert!(build_client(Some("bad\ntoken")).is_err());
        assert!(build_client(None).is_ok());
    }

    #[test]
    fn test_snippet_response_parses_server_shape() {
        let json = r#"{
            "url": "http://h/snippets/1/", "id": 1,
            "highlight": "http://h/snippets/1/highlight/",
            "owner": null, "title": "", "code": "x",
            "linenos": false, "language": "python", "style": "friendly"
        }"#;
        let snippet: SnippetResponse = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.id, 1);
        assert!(snippet.owner.is_none());
    }
}
