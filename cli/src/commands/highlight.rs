//! HIGHLIGHT command - Fetch a snippet's highlighted HTML page.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;

use super::{endpoint, fetch_text};

/// Arguments for the highlight command.
#[derive(Args)]
pub struct HighlightArgs {
    /// Snippet ID
    pub id: i64,

    /// Write the page to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Execute the highlight command.
pub async fn execute(client: &Client, base_url: &str, human: bool, args: HighlightArgs) -> Result<()> {
    let url = endpoint(base_url, &format!("/snippets/{}/highlight/", args.id));
    let page = fetch_text(client.get(&url)).await?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &page)?;
            if human {
                println!(
                    "{} {}",
                    "Highlighted page written to".green(),
                    path.display()
                );
            }
        }
        None => print!("{}", page),
    }
    Ok(())
}
