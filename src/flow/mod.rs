//! Session and verification flow for the landing page: modal routing,
//! credential intake, verification codes, the persisted login flag and the
//! layout that follows it.

pub mod actions;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod layout;
pub mod modal;
pub mod prompt;
pub mod session;
pub mod showcase;
pub mod timer;
pub mod verification;

pub use self::actions::{Outcome, UiAction};
pub use self::controller::{FlowController, FlowState};
pub use self::error::FlowError;
pub use self::modal::ModalId;
pub use self::prompt::{Prompter, ScriptedPrompter};
pub use self::session::{SessionState, SessionStore};
pub use self::timer::{Scheduler, TimerEvent, TimerQueue};

use std::time::Duration;

/// Flow timings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowConfig {
    /// Seconds the resend control stays disabled after a resend.
    pub resend_cooldown_secs: u32,
    /// Countdown granularity of the resend control.
    pub resend_tick: Duration,
    /// How long the code cells stay highlighted after a wrong code.
    pub error_highlight: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: 30,
            resend_tick: Duration::from_secs(1),
            error_highlight: Duration::from_secs(1),
        }
    }
}
