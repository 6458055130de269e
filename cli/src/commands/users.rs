//! USERS command - List users, or show one.

use anyhow::Result;
use clap::Args;
use reqwest::Client;

use super::{UserResponse, endpoint, make_request, output};

/// Arguments for the users command.
#[derive(Args)]
pub struct UsersArgs {
    /// Show only this user
    pub id: Option<i64>,
}

/// Execute the users command.
pub async fn execute(client: &Client, base_url: &str, human: bool, args: UsersArgs) -> Result<()> {
    match args.id {
        Some(id) => {
            let url = endpoint(base_url, &format!("/users/{}/", id));
            let user: UserResponse = make_request(client.get(&url)).await?;
            output(&user, human)
        }
        None => {
            let users: Vec<UserResponse> =
                make_request(client.get(endpoint(base_url, "/users/"))).await?;
            output(&users, human)
        }
    }
}
