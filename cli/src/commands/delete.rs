//! DELETE command - Delete a snippet.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;

use super::{endpoint, send_empty};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Snippet ID to delete
    pub id: i64,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute the delete command.
pub async fn execute(client: &Client, base_url: &str, human: bool, args: DeleteArgs) -> Result<()> {
    if human && !args.yes {
        eprint!(
            "{} Are you sure you want to delete snippet {}? [y/N] ",
            "Warning:".yellow().bold(),
            args.id
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let url = endpoint(base_url, &format!("/snippets/{}/", args.id));
    send_empty(client.delete(&url)).await?;

    if human {
        println!("{}", "Snippet deleted.".green().bold());
        println!("  {} {}", "ID:".cyan(), args.id);
    } else {
        println!("{}", serde_json::json!({ "id": args.id, "deleted": true }));
    }
    Ok(())
}
