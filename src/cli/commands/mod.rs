pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_STORAGE: &str = "storage";
pub const ARG_EPHEMERAL: &str = "ephemeral";
pub const ARG_SCRIPT: &str = "script";
pub const ARG_GATE_ANSWER: &str = "gate-answer";

pub const DEFAULT_STORAGE: &str = "paddlecoach-session.json";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("paddlecoach")
        .about("PaddleCoach sign-up, verification and session flow")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_STORAGE)
                .short('s')
                .long("storage")
                .help("File standing in for browser local storage")
                .default_value(DEFAULT_STORAGE)
                .env("PADDLECOACH_STORAGE"),
        )
        .arg(
            Arg::new(ARG_EPHEMERAL)
                .long("ephemeral")
                .help("Keep the session in memory only")
                .env("PADDLECOACH_EPHEMERAL")
                .action(ArgAction::SetTrue)
                .conflicts_with(ARG_STORAGE),
        )
        .arg(
            Arg::new(ARG_SCRIPT)
                .long("script")
                .help("Read actions from a file instead of stdin")
                .env("PADDLECOACH_SCRIPT"),
        )
        .arg(
            Arg::new(ARG_GATE_ANSWER)
                .long("gate-answer")
                .help("Answer to the login prompt of gated features")
                .default_value("login")
                .env("PADDLECOACH_GATE_ANSWER")
                .value_parser(["login", "signup"]),
        );

    logging::with_args(command)
}
