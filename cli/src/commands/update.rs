//! UPDATE command - Change fields of an existing snippet.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use reqwest::Client;
use serde_json::{Map, Value, json};

use super::{SnippetResponse, endpoint, make_request, output};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Snippet ID
    pub id: i64,

    /// New source code
    #[arg(long, conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the new source code from a file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New language
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// New highlighting style (friendly, github, solarized-dark, solarized-light,
    /// ocean-dark, eighties or mocha)
    #[arg(long, short = 's')]
    pub style: Option<String>,

    /// Turn line numbers on or off
    #[arg(long)]
    pub linenos: Option<bool>,
}

/// Build a PATCH body holding only the fields that were given.
fn build_body(args: &UpdateArgs, code: Option<String>) -> Map<String, Value> {
    let mut body = Map::new();
    if let Some(code) = code {
        body.insert("code".to_string(), json!(code));
    }
    if let Some(title) = &args.title {
        body.insert("title".to_string(), json!(title));
    }
    if let Some(language) = &args.language {
        body.insert("language".to_string(), json!(language));
    }
    if let Some(style) = &args.style {
        body.insert("style".to_string(), json!(style));
    }
    if let Some(linenos) = args.linenos {
        body.insert("linenos".to_string(), json!(linenos));
    }
    body
}

/// Execute the update command.
pub async fn execute(client: &Client, base_url: &str, human: bool, args: UpdateArgs) -> Result<()> {
    let code = match (&args.code, &args.file) {
        (Some(code), _) => Some(code.clone()),
        (None, Some(path)) => Some(std::fs::read_to_string(path)?),
        (None, None) => None,
    };

    let body = build_body(&args, code);
    if body.is_empty() {
        bail!("nothing to update; pass at least one field");
    }

    let url = endpoint(base_url, &format!("/snippets/{}/", args.id));
    let response: SnippetResponse = make_request(client.patch(&url).json(&body)).await?;

    output(&response, human)
}
