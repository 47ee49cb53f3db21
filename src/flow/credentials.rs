//! Sign-up and log-in form intake with local password policy checks.

use crate::flow::FlowError;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::{fmt, str::FromStr};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Length,
    Uppercase,
    Lowercase,
    Number,
}

impl Requirement {
    pub const ALL: [Self; 4] = [Self::Length, Self::Uppercase, Self::Lowercase, Self::Number];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Length => "At least 8 characters",
            Self::Uppercase => "One uppercase letter",
            Self::Lowercase => "One lowercase letter",
            Self::Number => "One number",
        }
    }
}

/// Strength indicator state shown under the sign-up password field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordChecks {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
}

impl PasswordChecks {
    /// Evaluate all four rules against the current field value.
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        Self {
            // The browser measures field length in UTF-16 code units.
            length: password.encode_utf16().count() >= MIN_PASSWORD_LEN,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    #[must_use]
    pub const fn is_met(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Length => self.length,
            Requirement::Uppercase => self.uppercase,
            Requirement::Lowercase => self.lowercase,
            Requirement::Number => self.number,
        }
    }

    #[must_use]
    pub fn unmet(&self) -> Vec<Requirement> {
        Requirement::ALL
            .into_iter()
            .filter(|requirement| !self.is_met(*requirement))
            .collect()
    }

    #[must_use]
    pub const fn all_met(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.number
    }
}

/// Mirror of the browser `type=email` check: local part, `@`, domain, no
/// whitespace.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Validate a full password against the sign-up policy.
///
/// # Errors
/// Returns `FlowError::WeakPassword` listing every unmet rule.
pub fn validate_password(password: &str) -> Result<(), FlowError> {
    let checks = PasswordChecks::evaluate(password);
    if checks.all_met() {
        Ok(())
    } else {
        Err(FlowError::WeakPassword(checks.unmet()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Password,
    Confirm,
}

impl FromStr for SignupField {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "confirm" | "confirm-password" => Ok(Self::Confirm),
            other => Err(FlowError::InvalidArgument(format!(
                "unknown sign-up field: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl FromStr for LoginField {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            other => Err(FlowError::InvalidArgument(format!(
                "unknown log-in field: {other}"
            ))),
        }
    }
}

/// Password inputs with a show/hide toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordField {
    Signup,
    SignupConfirm,
    Login,
}

impl FromStr for PasswordField {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "signup" | "password" => Ok(Self::Signup),
            "confirm" => Ok(Self::SignupConfirm),
            "login" => Ok(Self::Login),
            other => Err(FlowError::InvalidArgument(format!(
                "unknown password field: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordVisibility {
    signup: bool,
    signup_confirm: bool,
    login: bool,
}

impl PasswordVisibility {
    /// Flip the field between masked and revealed, returning the new state.
    pub fn toggle(&mut self, field: PasswordField) -> bool {
        let slot = match field {
            PasswordField::Signup => &mut self.signup,
            PasswordField::SignupConfirm => &mut self.signup_confirm,
            PasswordField::Login => &mut self.login,
        };
        *slot = !*slot;
        *slot
    }

    #[must_use]
    pub const fn is_revealed(&self, field: PasswordField) -> bool {
        match field {
            PasswordField::Signup => self.signup,
            PasswordField::SignupConfirm => self.signup_confirm,
            PasswordField::Login => self.login,
        }
    }
}

#[derive(Debug)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            confirm_password: SecretString::from(String::new()),
        }
    }
}

impl SignupForm {
    pub fn set(&mut self, field: SignupField, value: &str) {
        match field {
            SignupField::Name => self.name = value.to_string(),
            SignupField::Email => self.email = value.to_string(),
            SignupField::Password => self.password = SecretString::from(value.to_string()),
            SignupField::Confirm => self.confirm_password = SecretString::from(value.to_string()),
        }
    }

    /// Check the draft and turn it into a pending sign-up.
    ///
    /// # Errors
    /// Returns the first failing check: a required field, the email shape, the
    /// password policy, then the confirmation match.
    pub fn validate(&self) -> Result<PendingSignup, FlowError> {
        let password = self.password.expose_secret();
        let confirm = self.confirm_password.expose_secret();

        if self.name.is_empty() {
            return Err(FlowError::MissingField("name"));
        }
        if self.email.is_empty() {
            return Err(FlowError::MissingField("email"));
        }
        if !valid_email(&self.email) {
            return Err(FlowError::InvalidEmail);
        }
        if password.is_empty() {
            return Err(FlowError::MissingField("password"));
        }
        if confirm.is_empty() {
            return Err(FlowError::MissingField("confirm password"));
        }

        validate_password(password)?;

        if password != confirm {
            return Err(FlowError::PasswordMismatch);
        }

        Ok(PendingSignup {
            name: self.name.clone(),
            email: self.email.clone(),
            password: SecretString::from(password.to_string()),
        })
    }
}

#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
    /// Captured with the form; session lifetime does not depend on it.
    pub remember_me: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: SecretString::from(String::new()),
            remember_me: false,
        }
    }
}

impl LoginForm {
    pub fn set(&mut self, field: LoginField, value: &str) {
        match field {
            LoginField::Email => self.email = value.to_string(),
            LoginField::Password => self.password = SecretString::from(value.to_string()),
        }
    }

    /// # Errors
    /// Returns an error if a required field is empty or the email is malformed.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.email.is_empty() {
            return Err(FlowError::MissingField("email"));
        }
        if !valid_email(&self.email) {
            return Err(FlowError::InvalidEmail);
        }
        if self.password.expose_secret().is_empty() {
            return Err(FlowError::MissingField("password"));
        }
        Ok(())
    }
}

/// Sign-up data held in memory until the email is verified. The password is
/// kept as entered; it is only redacted from `Debug`.
#[derive(Debug)]
pub struct PendingSignup {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl fmt::Display for PendingSignup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
