use crate::cli::{
    actions::{console::Args, Action},
    commands::{ARG_EPHEMERAL, ARG_GATE_ANSWER, ARG_SCRIPT, ARG_STORAGE, DEFAULT_STORAGE},
    terminal::GateAnswer,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// # Errors
/// Returns an error if an argument value cannot be interpreted.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let storage = matches
        .get_one::<String>(ARG_STORAGE)
        .map_or_else(|| PathBuf::from(DEFAULT_STORAGE), PathBuf::from);
    let ephemeral = matches.get_flag(ARG_EPHEMERAL);
    let script = matches.get_one::<String>(ARG_SCRIPT).map(PathBuf::from);

    let gate_answer = matches
        .get_one::<String>(ARG_GATE_ANSWER)
        .map(|answer| answer.parse::<GateAnswer>())
        .transpose()
        .context("invalid PADDLECOACH_GATE_ANSWER")?
        .unwrap_or_default();

    Ok(Action::Console(Args {
        storage,
        ephemeral,
        script,
        gate_answer,
    }))
}
