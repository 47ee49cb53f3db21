use clap::{Arg, ArgAction, ArgMatches, Command};
use std::str::FromStr;
use tracing::Level;

pub const ARG_VERBOSE: &str = "verbose";
pub const ARG_LOG_LEVEL: &str = "log-level";

/// Adds `-v` (repeatable) and `--log-level`. Neither set means errors only.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSE)
                .short('v')
                .long("verbose")
                .help("Raise the log level once per flag: -v warn up to -vvvv trace")
                .global(true)
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new(ARG_LOG_LEVEL)
                .long("log-level")
                .help("Log level: error, warn, info, debug, trace, or 0-4")
                .env("PADDLECOACH_LOG_LEVEL")
                .global(true)
                .value_parser(parse_level),
        )
}

/// `-v` flags win over `--log-level`, which wins over the error-only default.
#[must_use]
pub fn level(matches: &ArgMatches) -> Level {
    match matches.get_one::<u8>(ARG_VERBOSE).copied().unwrap_or(0) {
        0 => matches
            .get_one::<Level>(ARG_LOG_LEVEL)
            .copied()
            .unwrap_or(Level::ERROR),
        count => from_count(count),
    }
}

const fn from_count(count: u8) -> Level {
    match count {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn parse_level(raw: &str) -> Result<Level, String> {
    if let Ok(count) = raw.parse::<u8>() {
        return if count <= 4 {
            Ok(from_count(count))
        } else {
            Err(format!("log level {count} is above 4"))
        };
    }
    Level::from_str(raw).map_err(|_| format!("unknown log level {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(argv: &[&str]) -> Level {
        let matches = with_args(Command::new("t")).get_matches_from(argv);
        level(&matches)
    }

    #[test]
    fn numbers_and_names_parse_to_the_same_level() {
        assert_eq!(parse_level("0"), Ok(Level::ERROR));
        assert_eq!(parse_level("2"), Ok(Level::INFO));
        assert_eq!(parse_level("info"), Ok(Level::INFO));
        assert_eq!(parse_level("DEBUG"), Ok(Level::DEBUG));
        assert!(parse_level("5").is_err());
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn verbose_flags_take_precedence() {
        temp_env::with_vars([("PADDLECOACH_LOG_LEVEL", Some("trace"))], || {
            assert_eq!(resolved(&["t"]), Level::TRACE);
            assert_eq!(resolved(&["t", "-v"]), Level::WARN);
            assert_eq!(resolved(&["t", "-vvvvvv"]), Level::TRACE);
        });
    }

    #[test]
    fn defaults_to_errors_only() {
        temp_env::with_vars([("PADDLECOACH_LOG_LEVEL", None::<&str>)], || {
            assert_eq!(resolved(&["t"]), Level::ERROR);
            assert_eq!(resolved(&["t", "--log-level", "debug"]), Level::DEBUG);
        });
    }

    #[test]
    fn unknown_env_level_is_rejected() {
        temp_env::with_vars([("PADDLECOACH_LOG_LEVEL", Some("loud"))], || {
            let result = with_args(Command::new("t")).try_get_matches_from(["t"]);
            assert!(result.is_err());
        });
    }
}
