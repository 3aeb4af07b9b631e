use crate::{
    cli::commands::client::Request,
    client::ApiClient,
};
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub base_url: String,
    pub request: Request,
}

/// Execute the client action and print the JSON answer.
/// # Errors
/// Returns an error if the request fails or the answer is not JSON.
pub async fn execute(args: Args) -> Result<()> {
    let client = ApiClient::new(args.base_url)?;

    debug!("Calling {} with {:?}", client.base_url(), args.request);

    let value: Value = match &args.request {
        Request::Get { endpoint } => client.fetch_data(endpoint).await?,
        Request::Post { endpoint, data } => client.post_data(endpoint, data).await?,
    };

    let json = serde_json::to_string_pretty(&value).context("Failed to format response")?;
    println!("{json}");

    Ok(())
}
