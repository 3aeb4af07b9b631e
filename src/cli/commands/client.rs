use crate::client::{resolve_base_url, LEGACY_API_URL_ENV};
use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgMatches, Command};
use serde_json::Value;

pub const CMD_CLIENT: &str = "client";
pub const CMD_GET: &str = "get";
pub const CMD_POST: &str = "post";
pub const ARG_API_URL: &str = "api-url";
pub const ARG_ENDPOINT: &str = "endpoint";
pub const ARG_DATA: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get { endpoint: String },
    Post { endpoint: String, data: Value },
}

#[derive(Debug, Clone)]
pub struct Options {
    pub base_url: String,
    pub request: Request,
}

impl Options {
    /// Parse client arguments from the `client` subcommand matches.
    ///
    /// # Errors
    /// Returns an error if the request subcommand is missing or `--data` is not JSON.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let endpoint = |sub: &ArgMatches| -> Result<String> {
            sub.get_one::<String>(ARG_ENDPOINT)
                .cloned()
                .ok_or_else(|| anyhow!("missing required argument: <{ARG_ENDPOINT}>"))
        };

        let Some((name, sub)) = matches.subcommand() else {
            return Err(anyhow!("missing client request: use `get` or `post`"));
        };

        // `--api-url` is global, so it may sit on either side of the request subcommand.
        let base_url = resolve_base_url(
            sub.get_one::<String>(ARG_API_URL)
                .or_else(|| matches.get_one::<String>(ARG_API_URL))
                .cloned(),
            std::env::var(LEGACY_API_URL_ENV).ok(),
        );

        let request = match name {
            CMD_GET => Request::Get {
                endpoint: endpoint(sub)?,
            },
            CMD_POST => {
                let raw = sub
                    .get_one::<String>(ARG_DATA)
                    .map_or("{}", String::as_str);
                Request::Post {
                    endpoint: endpoint(sub)?,
                    data: serde_json::from_str(raw)
                        .with_context(|| format!("--{ARG_DATA} is not valid JSON"))?,
                }
            }
            other => return Err(anyhow!("unknown client request: {other}")),
        };

        Ok(Self { base_url, request })
    }
}

fn endpoint_arg() -> Arg {
    Arg::new(ARG_ENDPOINT)
        .help("Endpoint path appended to the API URL, example: /api/users")
        .required(true)
}

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_CLIENT)
        .about("Call the demo API and print the JSON answer")
        .subcommand_required(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("API base URL (falls back to REACT_APP_API_URL, then http://localhost:3001)")
                .env("SHOWCASE_API_URL")
                .global(true),
        )
        .subcommand(
            Command::new(CMD_GET)
                .about("GET an endpoint")
                .arg(endpoint_arg()),
        )
        .subcommand(
            Command::new(CMD_POST)
                .about("POST a JSON body to an endpoint")
                .arg(endpoint_arg())
                .arg(
                    Arg::new(ARG_DATA)
                        .short('d')
                        .long("data")
                        .help("JSON request body")
                        .default_value("{}"),
                ),
        )
}
