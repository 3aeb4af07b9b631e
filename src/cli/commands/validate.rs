use crate::hook::{resolve_target, Format, TOOL_INPUT_ENV};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

pub const CMD_VALIDATE: &str = "validate";
pub const ARG_FILE: &str = "file";
pub const ARG_FORMAT: &str = "format";

#[derive(Debug, Clone)]
pub struct Options {
    pub target: Option<PathBuf>,
    pub format: Format,
}

impl Options {
    /// Parse validator arguments. `TOOL_INPUT` takes precedence over the
    /// positional file, matching how hook runners pass the edited path.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            target: resolve_target(
                std::env::var(TOOL_INPUT_ENV).ok(),
                matches.get_one::<String>(ARG_FILE).cloned(),
            ),
            format: matches
                .get_one::<Format>(ARG_FORMAT)
                .copied()
                .unwrap_or_default(),
        }
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_VALIDATE)
        .about("Check an API route file for common issues (advisory, always exits 0)")
        .arg(
            Arg::new(ARG_FILE)
                .help("Route file to check; TOOL_INPUT overrides it when set")
                .required(false),
        )
        .arg(
            Arg::new(ARG_FORMAT)
                .long("format")
                .help("Output format: text or json")
                .default_value("text")
                .value_parser(clap::value_parser!(Format)),
        )
}
