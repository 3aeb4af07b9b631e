use crate::api::{self, ServerConfig};
use anyhow::Result;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub cors_origin: Option<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the CORS origin is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let config = ServerConfig::new(args.port).with_cors_origin(args.cors_origin);

    api::new(config).await
}
