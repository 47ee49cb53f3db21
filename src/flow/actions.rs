//! UI actions the controller reacts to, and the name-keyed table that parses
//! them from text.

use crate::flow::{
    credentials::{LoginField, PasswordField, SignupField},
    modal::ModalId,
    showcase::{SocialProvider, VideoFile},
    FlowError,
};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    Open(ModalId),
    Close(ModalId),
    Switch(ModalId),
    Backdrop(ModalId),
    CloseAll,
    SignupInput(SignupField, String),
    SubmitSignup,
    LoginInput(LoginField, String),
    RememberMe(bool),
    SubmitLogin,
    TogglePassword(PasswordField),
    SocialLogin(SocialProvider),
    DigitInput { cell: usize, value: String },
    Backspace(usize),
    Paste { cell: usize, text: String },
    SubmitVerification,
    Resend,
    ToggleUserMenu,
    ClickOutsideUserMenu,
    Logout,
    Showcase(String),
    UploadVideo,
    VideoSelected(VideoFile),
}

/// What the surface has to do after an action was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    /// The action had no effect in the current state.
    Ignored,
    /// Show the native file picker for a match video.
    OpenFilePicker,
}

type Parser = fn(Args<'_>) -> Result<UiAction, FlowError>;

/// Action names as they appear in scripts, with their argument parsers.
pub const ACTIONS: &[(&str, Parser)] = &[
    ("open", |args| Ok(UiAction::Open(args.modal()?))),
    ("close", |args| Ok(UiAction::Close(args.modal()?))),
    ("switch", |args| Ok(UiAction::Switch(args.modal()?))),
    ("backdrop", |args| Ok(UiAction::Backdrop(args.modal()?))),
    ("close-all", |_| Ok(UiAction::CloseAll)),
    ("signup-field", |args| {
        let field = SignupField::from_str(args.word(0, "field")?)?;
        Ok(UiAction::SignupInput(field, args.value(1).to_string()))
    }),
    ("submit-signup", |_| Ok(UiAction::SubmitSignup)),
    ("login-field", |args| {
        let field = LoginField::from_str(args.word(0, "field")?)?;
        Ok(UiAction::LoginInput(field, args.value(1).to_string()))
    }),
    ("remember", |args| match args.word(0, "on|off")? {
        "on" | "true" | "yes" => Ok(UiAction::RememberMe(true)),
        "off" | "false" | "no" => Ok(UiAction::RememberMe(false)),
        other => Err(FlowError::InvalidArgument(format!("remember: {other}"))),
    }),
    ("submit-login", |_| Ok(UiAction::SubmitLogin)),
    ("toggle-password", |args| {
        Ok(UiAction::TogglePassword(PasswordField::from_str(
            args.word(0, "field")?,
        )?))
    }),
    ("social", |args| match args.word(0, "provider")? {
        "google" => Ok(UiAction::SocialLogin(SocialProvider::Google)),
        "facebook" => Ok(UiAction::SocialLogin(SocialProvider::Facebook)),
        other => Err(FlowError::InvalidArgument(format!("social: {other}"))),
    }),
    ("digit", |args| {
        Ok(UiAction::DigitInput {
            cell: args.number(0, "cell")?,
            value: args.value(1).to_string(),
        })
    }),
    ("backspace", |args| Ok(UiAction::Backspace(args.number(0, "cell")?))),
    ("paste", |args| {
        Ok(UiAction::Paste {
            cell: args.number(0, "cell")?,
            text: args.value(1).to_string(),
        })
    }),
    ("verify", |_| Ok(UiAction::SubmitVerification)),
    ("resend", |_| Ok(UiAction::Resend)),
    ("menu", |_| Ok(UiAction::ToggleUserMenu)),
    ("click-away", |_| Ok(UiAction::ClickOutsideUserMenu)),
    ("logout", |_| Ok(UiAction::Logout)),
    ("showcase", |args| {
        let label = args.words().join(" ");
        if label.is_empty() {
            return Err(FlowError::InvalidArgument("showcase: missing label".to_string()));
        }
        Ok(UiAction::Showcase(label))
    }),
    ("upload", |_| Ok(UiAction::UploadVideo)),
    ("video", |args| {
        Ok(UiAction::VideoSelected(VideoFile {
            name: args.word(0, "name")?.to_string(),
            size_bytes: args.number(1, "bytes")?,
            mime_type: args.word(2, "mime")?.to_string(),
        }))
    }),
];

impl UiAction {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::Close(_) => "close",
            Self::Switch(_) => "switch",
            Self::Backdrop(_) => "backdrop",
            Self::CloseAll => "close-all",
            Self::SignupInput(..) => "signup-field",
            Self::SubmitSignup => "submit-signup",
            Self::LoginInput(..) => "login-field",
            Self::RememberMe(_) => "remember",
            Self::SubmitLogin => "submit-login",
            Self::TogglePassword(_) => "toggle-password",
            Self::SocialLogin(_) => "social",
            Self::DigitInput { .. } => "digit",
            Self::Backspace(_) => "backspace",
            Self::Paste { .. } => "paste",
            Self::SubmitVerification => "verify",
            Self::Resend => "resend",
            Self::ToggleUserMenu => "menu",
            Self::ClickOutsideUserMenu => "click-away",
            Self::Logout => "logout",
            Self::Showcase(_) => "showcase",
            Self::UploadVideo => "upload",
            Self::VideoSelected(_) => "video",
        }
    }

    /// Look up `name` in the action table and parse `args`, the raw text
    /// that followed the name on the line.
    ///
    /// # Errors
    /// `UnknownAction` for names not in the table, otherwise the parser's
    /// argument error.
    pub fn parse(name: &str, args: &str) -> Result<Self, FlowError> {
        let (_, parser) = ACTIONS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .ok_or_else(|| FlowError::UnknownAction(name.to_string()))?;
        parser(Args(args))
    }
}

impl FromStr for UiAction {
    type Err = FlowError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, args) = split_command(line);
        if name.is_empty() {
            return Err(FlowError::UnknownAction(String::new()));
        }
        Self::parse(name, args)
    }
}

/// Split off the first word. The remainder loses exactly one separator and
/// is otherwise kept verbatim.
#[must_use]
pub fn split_command(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(at) => {
            let (name, rest) = line.split_at(at);
            let mut rest = rest.chars();
            rest.next();
            (name, rest.as_str())
        }
        None => (line, ""),
    }
}

/// Arguments of one action: positional words, plus free text values that
/// keep their spacing.
#[derive(Clone, Copy, Debug)]
pub struct Args<'a>(&'a str);

impl<'a> Args<'a> {
    fn word(self, index: usize, what: &str) -> Result<&'a str, FlowError> {
        self.0
            .split_whitespace()
            .nth(index)
            .ok_or_else(|| FlowError::InvalidArgument(format!("missing {what}")))
    }

    fn words(self) -> Vec<&'a str> {
        self.0.split_whitespace().collect()
    }

    fn number<T: FromStr>(self, index: usize, what: &str) -> Result<T, FlowError> {
        let raw = self.word(index, what)?;
        raw.parse()
            .map_err(|_| FlowError::InvalidArgument(format!("{what} must be a number, got {raw}")))
    }

    fn modal(self) -> Result<ModalId, FlowError> {
        self.word(0, "modal")?.parse()
    }

    /// Everything after the first `skip` words, spaces included.
    fn value(self, skip: usize) -> &'a str {
        (0..skip).fold(self.0, |rest, _| split_command(rest).1)
    }
}
