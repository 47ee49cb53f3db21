//! Line-based command scripts.
//!
//! Every line is either one `UiAction` by its table name, a shorthand that
//! expands to several actions, or a driver command (`status`, `wait`,
//! `quit`).

use crate::flow::{
    actions::split_command,
    credentials::{LoginField, SignupField},
    FlowError, ModalId, UiAction,
};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptLine {
    Blank,
    Ui(UiAction),
    Batch(Vec<UiAction>),
    Status,
    Wait(Duration),
    Quit,
}

impl ScriptLine {
    /// # Errors
    /// Returns the parse error of the action on the line.
    pub fn parse(line: &str) -> Result<Self, FlowError> {
        // Trailing spaces may belong to a typed value.
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Self::Blank);
        }

        let (name, rest) = split_command(line);
        let words: Vec<&str> = rest.split_whitespace().collect();

        match name {
            "status" => Ok(Self::Status),
            "quit" | "exit" => Ok(Self::Quit),
            "wait" => wait(&words),
            "signup" => signup(&words),
            "login" => login(&words),
            "code" => code(&words),
            _ => UiAction::parse(name, rest).map(Self::Ui),
        }
    }

    /// Actions to dispatch for this line, in order.
    #[must_use]
    pub fn actions(self) -> Vec<UiAction> {
        match self {
            Self::Ui(action) => vec![action],
            Self::Batch(actions) => actions,
            Self::Blank | Self::Status | Self::Wait(_) | Self::Quit => Vec::new(),
        }
    }
}

fn wait(args: &[&str]) -> Result<ScriptLine, FlowError> {
    let raw = args
        .first()
        .ok_or_else(|| FlowError::InvalidArgument("wait: missing seconds".to_string()))?;
    raw.parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .map(ScriptLine::Wait)
        .ok_or_else(|| FlowError::InvalidArgument(format!("wait: invalid seconds {raw}")))
}

// signup <name...> <email> <password> <confirm>
fn signup(args: &[&str]) -> Result<ScriptLine, FlowError> {
    let [name @ .., email, password, confirm] = args else {
        return Err(FlowError::InvalidArgument(
            "signup: expected <name> <email> <password> <confirm>".to_string(),
        ));
    };
    if name.is_empty() {
        return Err(FlowError::InvalidArgument("signup: missing name".to_string()));
    }

    Ok(ScriptLine::Batch(vec![
        UiAction::Open(ModalId::Signup),
        UiAction::SignupInput(SignupField::Name, name.join(" ")),
        UiAction::SignupInput(SignupField::Email, (*email).to_string()),
        UiAction::SignupInput(SignupField::Password, (*password).to_string()),
        UiAction::SignupInput(SignupField::Confirm, (*confirm).to_string()),
        UiAction::SubmitSignup,
    ]))
}

// login <email> <password> [remember]
fn login(args: &[&str]) -> Result<ScriptLine, FlowError> {
    let (email, password, remember) = match args {
        [email, password] => (email, password, false),
        [email, password, "remember"] => (email, password, true),
        _ => {
            return Err(FlowError::InvalidArgument(
                "login: expected <email> <password> [remember]".to_string(),
            ))
        }
    };

    Ok(ScriptLine::Batch(vec![
        UiAction::Open(ModalId::Login),
        UiAction::LoginInput(LoginField::Email, (*email).to_string()),
        UiAction::LoginInput(LoginField::Password, (*password).to_string()),
        UiAction::RememberMe(remember),
        UiAction::SubmitLogin,
    ]))
}

fn code(args: &[&str]) -> Result<ScriptLine, FlowError> {
    let digits = args
        .first()
        .ok_or_else(|| FlowError::InvalidArgument("code: missing digits".to_string()))?;

    Ok(ScriptLine::Batch(vec![
        UiAction::Paste {
            cell: 0,
            text: (*digits).to_string(),
        },
        UiAction::SubmitVerification,
    ]))
}
