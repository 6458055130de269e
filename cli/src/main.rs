//! Command-line interface for the snippets API.
//!
//! Commands:
//! - root: Show the API's top-level links
//! - list: List snippets
//! - show: Show one snippet
//! - create: Create a snippet
//! - update: Change fields of a snippet
//! - delete: Delete a snippet
//! - highlight: Fetch a snippet's highlighted HTML page
//! - users: List users or show one
//!
//! Configuration via environment:
//! - SNIPPETS_URL: Base URL of the server (default: http://localhost:8000)
//! - SNIPPETS_TOKEN: JWT Bearer token for authentication

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    create::CreateArgs, delete::DeleteArgs, highlight::HighlightArgs, list::ListArgs,
    root::RootArgs, show::ShowArgs, update::UpdateArgs, users::UsersArgs,
};

/// Snippets API CLI
///
/// Prints JSON by default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "snippets")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Snippets server URL
    #[arg(
        long,
        env = "SNIPPETS_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    url: String,

    /// JWT Bearer token for authentication
    #[arg(long, env = "SNIPPETS_TOKEN", global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the API root links
    Root(RootArgs),

    /// List snippets
    List(ListArgs),

    /// Show a snippet
    Show(ShowArgs),

    /// Create a snippet
    Create(CreateArgs),

    /// Update a snippet you own
    Update(UpdateArgs),

    /// Delete a snippet you own
    Delete(DeleteArgs),

    /// Fetch the highlighted HTML of a snippet
    Highlight(HighlightArgs),

    /// List users, or show one by ID
    Users(UsersArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client(cli.token.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Root(args) => commands::root::execute(&client, &cli.url, cli.human, args).await,
        Commands::List(args) => commands::list::execute(&client, &cli.url, cli.human, args).await,
        Commands::Show(args) => commands::show::execute(&client, &cli.url, cli.human, args).await,
        Commands::Create(args) => {
            commands::create::execute(&client, &cli.url, cli.human, args).await
        }
        Commands::Update(args) => {
            commands::update::execute(&client, &cli.url, cli.human, args).await
        }
        Commands::Delete(args) => {
            commands::delete::execute(&client, &cli.url, cli.human, args).await
        }
        Commands::Highlight(args) => {
            commands::highlight::execute(&client, &cli.url, cli.human, args).await
        }
        Commands::Users(args) => commands::users::execute(&client, &cli.url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
