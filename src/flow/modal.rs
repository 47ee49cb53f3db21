//! Modal routing for the sign-up, log-in and verification dialogs. Exactly
//! one dialog can be visible; background scroll is locked while one is.

use crate::flow::FlowError;
use std::{fmt, str::FromStr};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModalId {
    Signup,
    Login,
    Verification,
}

impl ModalId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::Verification => "verification",
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalId {
    type Err = FlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "signup" | "signupmodal" => Ok(Self::Signup),
            "login" | "loginmodal" => Ok(Self::Login),
            "verification" | "verificationmodal" => Ok(Self::Verification),
            other => Err(FlowError::UnknownModal(other.to_string())),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModalRouter {
    visible: Option<ModalId>,
}

impl ModalRouter {
    #[must_use]
    pub const fn visible(&self) -> Option<ModalId> {
        self.visible
    }

    #[must_use]
    pub fn is_visible(&self, id: ModalId) -> bool {
        self.visible == Some(id)
    }

    /// Background page scroll is disabled while any modal is shown.
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.visible.is_some()
    }

    pub fn open(&mut self, id: ModalId) {
        if let Some(current) = self.visible.filter(|current| *current != id) {
            debug!("{current} modal replaced by {id}");
        }
        self.visible = Some(id);
    }

    pub fn close(&mut self, id: ModalId) {
        if self.visible == Some(id) {
            self.visible = None;
        }
    }

    /// Close sign-up and log-in, then open `id`.
    pub fn switch_to(&mut self, id: ModalId) {
        self.close(ModalId::Signup);
        self.close(ModalId::Login);
        self.open(id);
    }

    pub fn close_all(&mut self) {
        self.visible = None;
    }

    /// A click landed on the backdrop of `id`, outside its content.
    pub fn backdrop_click(&mut self, id: ModalId) {
        self.close(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_locks_scroll_and_close_releases_it() {
        let mut router = ModalRouter::default();
        assert!(!router.scroll_locked());

        router.open(ModalId::Signup);
        assert!(router.is_visible(ModalId::Signup));
        assert!(router.scroll_locked());

        router.close(ModalId::Signup);
        assert_eq!(router.visible(), None);
        assert!(!router.scroll_locked());
    }

    #[test]
    fn closing_a_hidden_modal_keeps_the_visible_one() {
        let mut router = ModalRouter::default();
        router.open(ModalId::Verification);
        router.close(ModalId::Login);
        assert!(router.is_visible(ModalId::Verification));
        assert!(router.scroll_locked());
    }

    #[test]
    fn open_never_leaves_two_modals_visible() {
        let mut router = ModalRouter::default();
        router.open(ModalId::Signup);
        router.open(ModalId::Login);
        assert!(router.is_visible(ModalId::Login));
        assert!(!router.is_visible(ModalId::Signup));
    }

    #[test]
    fn switch_between_signup_and_login() {
        let mut router = ModalRouter::default();
        router.open(ModalId::Signup);
        router.switch_to(ModalId::Login);
        assert_eq!(router.visible(), Some(ModalId::Login));
        router.switch_to(ModalId::Signup);
        assert_eq!(router.visible(), Some(ModalId::Signup));
    }

    #[test]
    fn backdrop_click_closes_only_its_modal() {
        let mut router = ModalRouter::default();
        router.open(ModalId::Login);
        router.backdrop_click(ModalId::Signup);
        assert!(router.is_visible(ModalId::Login));
        router.backdrop_click(ModalId::Login);
        assert!(!router.scroll_locked());
    }

    #[test]
    fn parse_modal_ids() {
        assert_eq!("signup".parse::<ModalId>().ok(), Some(ModalId::Signup));
        assert_eq!("loginModal".parse::<ModalId>().ok(), Some(ModalId::Login));
        assert_eq!(
            " Verification ".parse::<ModalId>().ok(),
            Some(ModalId::Verification)
        );
        assert!(matches!(
            "settings".parse::<ModalId>(),
            Err(FlowError::UnknownModal(id)) if id == "settings"
        ));
    }
}
