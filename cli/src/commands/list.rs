//! LIST command - List every snippet.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, SnippetResponse, endpoint, make_request, output, truncate};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only show snippets owned by this user
    #[arg(long)]
    pub owner: Option<String>,
}

/// Snippets in creation order.
#[derive(Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SnippetList(pub Vec<SnippetResponse>);

impl HumanReadable for SnippetList {
    fn print_human(&self) {
        println!("{} ({})", "Snippets".green().bold(), self.0.len());
        println!("{}", "=".repeat(60));
        for snippet in &self.0 {
            let first_line = snippet.code.lines().next().unwrap_or_default();
            println!(
                "{:>5}  {:<12} {:<10} {}",
                snippet.id.to_string().yellow(),
                snippet.owner.as_deref().unwrap_or("-"),
                snippet.language,
                truncate(
                    if snippet.title.is_empty() {
                        first_line
                    } else {
                        &snippet.title
                    },
                    40
                )
            );
        }
    }
}

/// Keep only snippets owned by `owner`, when given.
fn filter_by_owner(snippets: Vec<SnippetResponse>, owner: Option<&str>) -> Vec<SnippetResponse> {
    match owner {
        Some(owner) => snippets
            .into_iter()
            .filter(|s| s.owner.as_deref() == Some(owner))
            .collect(),
        None => snippets,
    }
}

/// Execute the list command.
pub async fn execute(client: &Client, base_url: &str, human: bool, args: ListArgs) -> Result<()> {
    let snippets: Vec<SnippetResponse> =
        make_request(client.get(endpoint(base_url, "/snippets/"))).await?;

    let response = SnippetList(filter_by_owner(snippets, args.owner.as_deref()));
    output(&response, human)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(id: i64, owner: Option<&str>) -> SnippetResponse {
        SnippetResponse {
            url: format!("http://h/snippets/{}/", id),
            id,
            highlight: format!("http://h/snippets/{}/highlight/", id),
            owner: owner.map(str::to_string),
            title: String::new(),
            code: "x".to_string(),
            linenos: false,
            language: "python".to_string(),
            style: "friendly".to_string(),
        }
    }

    #[test]
    fn test_filter_by_owner() {
        let all = vec![snippet(1, Some("alice")), snippet(2, Some("bob")), snippet(3, None)];
        let ids: Vec<i64> = filter_by_owner(all, Some("alice")).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let all = vec![snippet(1, Some("alice")), snippet(2, None)];
        assert_eq!(filter_by_owner(all, None).len(), 2);
    }
}
