use crate::api::DEFAULT_PORT;
use clap::{Arg, ArgMatches, Command};

pub const CMD_SERVE: &str = "serve";
pub const ARG_PORT: &str = "port";
pub const ARG_CORS_ORIGIN: &str = "cors-origin";

#[derive(Debug, Clone)]
pub struct Options {
    pub port: u16,
    pub cors_origin: Option<String>,
}

impl Options {
    /// Parse server arguments from the `serve` subcommand matches.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            port: matches
                .get_one::<u16>(ARG_PORT)
                .copied()
                .unwrap_or(DEFAULT_PORT),
            cors_origin: matches
                .get_one::<String>(ARG_CORS_ORIGIN)
                .cloned()
                .filter(|origin| !origin.trim().is_empty()),
        }
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_SERVE)
        .about("Run the demo API service")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("3000")
                .env("PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_CORS_ORIGIN)
                .long("cors-origin")
                .help("Origin allowed to call the API from a browser, example: http://localhost:3001")
                .env("SHOWCASE_CORS_ORIGIN"),
        )
}
