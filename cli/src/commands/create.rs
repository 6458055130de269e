//! CREATE command - Create a new snippet.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use reqwest::Client;
use serde_json::{Map, Value, json};

use super::{SnippetResponse, endpoint, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Source code of the snippet
    #[arg(long, conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the source code from a file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Snippet title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Language used for highlighting (server default: python)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Highlighting style: friendly, github, solarized-dark, solarized-light,
    /// ocean-dark, eighties or mocha (server default: friendly)
    #[arg(long, short = 's')]
    pub style: Option<String>,

    /// Number the lines of the highlighted page
    #[arg(long)]
    pub linenos: bool,
}

/// Build the request body, leaving unset options to the server's defaults.
fn build_body(code: String, args: &CreateArgs) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("code".to_string(), json!(code));
    body.insert("linenos".to_string(), json!(args.linenos));
    if let Some(title) = &args.title {
        body.insert("title".to_string(), json!(title));
    }
    if let Some(language) = &args.language {
        body.insert("language".to_string(), json!(language));
    }
    if let Some(style) = &args.style {
        body.insert("style".to_string(), json!(style));
    }
    body
}

/// Execute the create command.
pub async fn execute(client: &Client, base_url: &str, human: bool, args: CreateArgs) -> Result<()> {
    let code = match (&args.code, &args.file) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => bail!("either --code or --file is required"),
    };

    let body = build_body(code, &args);
    let url = endpoint(base_url, "/snippets/");
    let response: SnippetResponse = make_request(client.post(&url).json(&body)).await?;

    output(&response, human)
}
