//! SHOW command - Fetch one snippet.

use anyhow::Result;
use clap::Args;
use reqwest::Client;

use super::{SnippetResponse, endpoint, make_request, output};

/// Arguments for the show command.
#[derive(Args)]
pub struct ShowArgs {
    /// Snippet ID
    pub id: i64,
}

/// Execute the show command.
pub async fn execute(client: &Client, base_url: &str, human: bool, args: ShowArgs) -> Result<()> {
    let url = endpoint(base_url, &format!("/snippets/{}/", args.id));
    let response: SnippetResponse = make_request(client.get(&url)).await?;
    output(&response, human)
}
