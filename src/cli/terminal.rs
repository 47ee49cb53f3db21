use crate::flow::{FlowError, Prompter};
use std::{
    fmt,
    io::{self, Write},
    str::FromStr,
};
use tracing::debug;

/// How the terminal answers the login prompt of gated features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateAnswer {
    #[default]
    Login,
    Signup,
}

impl FromStr for GateAnswer {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "signup" => Ok(Self::Signup),
            other => Err(FlowError::InvalidArgument(format!("gate answer: {other}"))),
        }
    }
}

impl fmt::Display for GateAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::Signup => "signup",
        })
    }
}

/// Prints notices to a writer and answers confirmations from configuration.
pub struct TerminalPrompter<W = io::Stdout> {
    out: W,
    answer: GateAnswer,
}

impl TerminalPrompter {
    #[must_use]
    pub fn stdout(answer: GateAnswer) -> Self {
        Self::new(io::stdout(), answer)
    }
}

impl<W: Write> TerminalPrompter<W> {
    pub const fn new(out: W, answer: GateAnswer) -> Self {
        Self { out, answer }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, tag: &str, message: &str) {
        let mut lines = message.lines();
        let first = lines.next().unwrap_or_default();
        let mut text = format!("[{tag}] {first}\n");
        for line in lines {
            text.push_str("    ");
            text.push_str(line);
            text.push('\n');
        }
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            debug!("failed to write to terminal: {err}");
        }
    }
}

impl<W: Write> Prompter for TerminalPrompter<W> {
    fn notify(&mut self, message: &str) {
        self.write_block("notice", message);
    }

    fn confirm(&mut self, question: &str) -> bool {
        let accepted = self.answer == GateAnswer::Login;
        let reply = if accepted { "OK" } else { "Cancel" };
        self.write_block("confirm", &format!("{question}\n-> {reply}"));
        accepted
    }
}
