pub mod client;
pub mod logging;
pub mod server;
pub mod validate;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

pub const CMD_WELCOME: &str = "welcome";
pub const CMD_ABOUT: &str = "about";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("showcase")
        .about("Example projects for a developer workflow toolkit")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(server::command())
        .subcommand(validate::command())
        .subcommand(client::command())
        .subcommand(Command::new(CMD_WELCOME).about("Print the basic example project welcome"))
        .subcommand(Command::new(CMD_ABOUT).about("Print the web app landing page"));

    logging::with_args(command)
}
