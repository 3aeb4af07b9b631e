use crate::cli::actions::{banner, client, server, validate, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
        Action::Validate(args) => validate::execute(&args),
        Action::Client(args) => client::execute(args).await,
        Action::Welcome => banner::welcome(),
        Action::About => banner::about(),
    }
}
