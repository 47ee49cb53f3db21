use crate::flow::credentials::Requirement;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Please fill out the {0} field.")]
    MissingField(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("{}", weak_password_message(.0))]
    WeakPassword(Vec<Requirement>),
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Please enter the complete 6-digit code")]
    IncompleteCode,
    #[error("Invalid verification code. Please try again.")]
    CodeMismatch,
    #[error("resend is disabled for another {remaining}s")]
    ResendUnavailable { remaining: u32 },
    #[error("{0} not found")]
    MissingElement(&'static str),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("unknown modal: {0}")]
    UnknownModal(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl FlowError {
    /// Failures the user is told about through a blocking notice.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::PasswordMismatch
                | Self::IncompleteCode
                | Self::CodeMismatch
        )
    }
}

fn weak_password_message(unmet: &[Requirement]) -> String {
    let mut message =
        String::from("Password does not meet all requirements! Please ensure it has:");
    for requirement in unmet {
        message.push_str("\n- ");
        message.push_str(requirement.label());
    }
    message
}
