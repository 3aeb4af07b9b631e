//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{self, Action};
use crate::cli::commands::{self, client, server, validate};
use anyhow::{anyhow, Result};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand is missing or its arguments are inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((server::CMD_SERVE, sub_m)) => {
            let options = server::Options::parse(sub_m);
            Ok(Action::Server(actions::server::Args {
                port: options.port,
                cors_origin: options.cors_origin,
            }))
        }
        Some((validate::CMD_VALIDATE, sub_m)) => {
            let options = validate::Options::parse(sub_m);
            Ok(Action::Validate(actions::validate::Args {
                target: options.target,
                format: options.format,
            }))
        }
        Some((client::CMD_CLIENT, sub_m)) => {
            let options = client::Options::parse(sub_m)?;
            Ok(Action::Client(actions::client::Args {
                base_url: options.base_url,
                request: options.request,
            }))
        }
        Some((commands::CMD_WELCOME, _)) => Ok(Action::Welcome),
        Some((commands::CMD_ABOUT, _)) => Ok(Action::About),
        Some((other, _)) => Err(anyhow!("unknown command: {other}")),
        None => Err(anyhow!("missing command")),
    }
}
