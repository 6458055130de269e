//! ROOT command - Show the API's top-level links.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, endpoint, make_request, output};

/// Arguments for the root command.
#[derive(Args)]
pub struct RootArgs {}

/// Response from GET /.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiRoot {
    pub users: String,
    pub snippets: String,
}

impl HumanReadable for ApiRoot {
    fn print_human(&self) {
        println!("{}", "Snippets API".green().bold());
        println!("  {} {}", "Snippets:".cyan(), self.snippets);
        println!("  {} {}", "Users:".cyan(), self.users);
    }
}

/// Execute the root command.
pub async fn execute(client: &Client, base_url: &str, human: bool, _args: RootArgs) -> Result<()> {
    let response: ApiRoot = make_request(client.get(endpoint(base_url, "/"))).await?;
    output(&response, human)
}
