//! The flow controller owns all transient flow state and reacts to UI actions
//! and timer events. Storage, prompting, scheduling and randomness are
//! injected so the whole flow runs without a page.

use crate::flow::{
    actions::{Outcome, UiAction},
    credentials::{
        LoginForm, PasswordChecks, PasswordField, PasswordVisibility, PendingSignup,
        SignupField, SignupForm,
    },
    layout::{LayoutReconciler, PageLayout},
    modal::{ModalId, ModalRouter},
    prompt::Prompter,
    session::{SessionState, SessionStore},
    showcase::{coming_soon_notice, SocialProvider, VideoFile, LOGIN_PROMPT},
    timer::{Scheduler, TimerEvent, TimerQueue},
    verification::{CodeCells, ResendControl, VerificationCode, CODE_LEN},
    FlowConfig, FlowError,
};
use crate::storage::Storage;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

pub const SIGNUP_SUCCESS_PREFIX: &str = "Verification code sent to";
pub const LOGIN_SUCCESS: &str = "Login successful! Welcome back!";
pub const VERIFIED: &str = "Email verified successfully! Welcome to PaddleCoach!";
pub const LOGGED_OUT: &str = "You have been logged out successfully!";

/// Everything the page keeps in memory between events.
#[derive(Debug, Default)]
pub struct FlowState {
    pub modals: ModalRouter,
    pub signup_form: SignupForm,
    pub password_checks: PasswordChecks,
    pub login_form: LoginForm,
    pub password_visibility: PasswordVisibility,
    pub pending: Option<PendingSignup>,
    pub code: Option<VerificationCode>,
    /// Destination shown inside the verification modal.
    pub verification_email: Option<String>,
    pub cells: CodeCells,
    pub resend: ResendControl,
    pub layout: PageLayout,
    pub reconciler: LayoutReconciler,
}

pub struct FlowController<S, P, C = TimerQueue, R = StdRng> {
    config: FlowConfig,
    store: SessionStore<S>,
    prompter: P,
    scheduler: C,
    rng: R,
    state: FlowState,
}

impl<S: Storage, P: Prompter> FlowController<S, P> {
    /// Controller on the landing layout with a virtual clock and an
    /// entropy-seeded generator. Reconciles the layout with any stored
    /// session before returning.
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be read.
    pub fn new(storage: S, prompter: P) -> Result<Self, FlowError> {
        Self::with_parts(
            FlowConfig::default(),
            storage,
            prompter,
            TimerQueue::new(),
            StdRng::from_entropy(),
            PageLayout::landing(),
        )
    }
}

impl<S, P, C, R> FlowController<S, P, C, R>
where
    S: Storage,
    P: Prompter,
    C: Scheduler,
    R: Rng,
{
    /// # Errors
    /// Returns an error if the stored session cannot be read.
    pub fn with_parts(
        config: FlowConfig,
        storage: S,
        prompter: P,
        scheduler: C,
        rng: R,
        layout: PageLayout,
    ) -> Result<Self, FlowError> {
        let mut controller = Self {
            config,
            store: SessionStore::new(storage),
            prompter,
            scheduler,
            rng,
            state: FlowState {
                layout,
                ..FlowState::default()
            },
        };
        controller.reconcile_layout()?;
        Ok(controller)
    }

    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    pub const fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    pub const fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub const fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// # Errors
    /// Returns an error if the storage backend cannot be read.
    pub fn session(&self) -> Result<SessionState, FlowError> {
        Ok(self.store.load()?)
    }

    /// Align the page with the stored session flag.
    ///
    /// # Errors
    /// Returns an error if the storage backend cannot be read.
    pub fn reconcile_layout(&mut self) -> Result<(), FlowError> {
        let session = self.store.load()?;
        debug!(logged_in = session.is_logged_in, "reconciling layout");
        self.state
            .reconciler
            .reconcile(&mut self.state.layout, &session);
        Ok(())
    }

    /// Handle one UI action. User-facing failures are also shown through the
    /// prompter before being returned.
    ///
    /// # Errors
    /// Returns the failure of the handler, see `FlowError`.
    #[instrument(skip_all, fields(action = action.name()))]
    pub fn dispatch(&mut self, action: UiAction) -> Result<Outcome, FlowError> {
        let verifying = self.state.modals.is_visible(ModalId::Verification);
        let result = self.handle(action);
        if verifying && !self.state.modals.is_visible(ModalId::Verification) {
            self.abandon_verification();
        }
        if let Err(err) = &result {
            self.report(err);
        }
        result
    }

    /// Move the clock forward by `by`, delivering due timer events.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        self.advance_to(until);
    }

    /// Move the clock to `until`, delivering due timer events.
    pub fn advance_to(&mut self, until: Duration) {
        while let Some(event) = self.scheduler.pop_due(until) {
            self.on_timer(event);
        }
        self.scheduler.settle(until);
    }

    pub fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::ResendTick => {
                if self.state.resend.tick() {
                    self.scheduler
                        .schedule(self.config.resend_tick, TimerEvent::ResendTick);
                }
                debug!(label = %self.state.resend.label(), "resend countdown");
            }
            TimerEvent::HighlightRevert => self.state.cells.clear_highlight(),
        }
    }

    fn report(&mut self, err: &FlowError) {
        match err {
            err if err.is_user_facing() => {
                debug!("rejected: {err}");
                self.prompter.notify(&err.to_string());
            }
            FlowError::ResendUnavailable { .. } => debug!("ignored: {err}"),
            FlowError::MissingElement(_) | FlowError::Storage(_) => error!("{err}"),
            _ => warn!("{err}"),
        }
    }

    /// Leaving the verification modal without verifying drops the pending
    /// sign-up and its code.
    fn abandon_verification(&mut self) {
        if self.state.pending.is_some() || self.state.code.is_some() {
            debug!("verification abandoned");
        }
        self.state.pending = None;
        self.state.code = None;
        self.state.verification_email = None;
        self.state.cells = CodeCells::default();
    }

    fn handle(&mut self, action: UiAction) -> Result<Outcome, FlowError> {
        match action {
            UiAction::Open(id) => self.state.modals.open(id),
            UiAction::Close(id) => self.state.modals.close(id),
            UiAction::Switch(ModalId::Verification) => {
                debug!("verification is not a switch target");
                return Ok(Outcome::Ignored);
            }
            UiAction::Switch(id) => self.state.modals.switch_to(id),
            UiAction::Backdrop(id) => self.state.modals.backdrop_click(id),
            UiAction::CloseAll => self.state.modals.close_all(),
            UiAction::SignupInput(field, value) => self.edit_signup(field, &value),
            UiAction::SubmitSignup => self.submit_signup()?,
            UiAction::LoginInput(field, value) => self.state.login_form.set(field, &value),
            UiAction::RememberMe(remember) => self.state.login_form.remember_me = remember,
            UiAction::SubmitLogin => self.submit_login()?,
            UiAction::TogglePassword(field) => self.toggle_password(field),
            UiAction::SocialLogin(provider) => self.social_login(provider),
            UiAction::DigitInput { cell, value } => self.state.cells.input(cell, &value)?,
            UiAction::Backspace(cell) => self.state.cells.backspace(cell)?,
            UiAction::Paste { cell, text } => self.state.cells.paste(cell, &text)?,
            UiAction::SubmitVerification => self.submit_verification()?,
            UiAction::Resend => self.resend()?,
            UiAction::ToggleUserMenu => {
                self.state.layout.dropdown_open = !self.state.layout.dropdown_open;
            }
            UiAction::ClickOutsideUserMenu => self.state.layout.dropdown_open = false,
            UiAction::Logout => self.logout()?,
            UiAction::Showcase(label) => self.showcase(&label)?,
            UiAction::UploadVideo => return self.upload_video(),
            UiAction::VideoSelected(file) => self.video_selected(&file),
        }
        Ok(Outcome::Handled)
    }

    fn edit_signup(&mut self, field: SignupField, value: &str) {
        self.state.signup_form.set(field, value);
        if field == SignupField::Password {
            self.state.password_checks = PasswordChecks::evaluate(value);
        }
    }

    /// Validate the sign-up draft, issue a code and move to verification.
    ///
    /// # Errors
    /// Returns the validation failure; the draft is kept intact.
    pub fn submit_signup(&mut self) -> Result<(), FlowError> {
        let pending = self.state.signup_form.validate()?;
        let code = VerificationCode::issue(&mut self.rng);

        info!(email = %pending.email, code = %code, "sending verification code");
        self.prompter.notify(&format!(
            "{SIGNUP_SUCCESS_PREFIX} {}\n\nFor demo purposes, your code is: {code}",
            pending.email
        ));

        self.state.modals.close(ModalId::Signup);
        self.state.modals.open(ModalId::Verification);
        self.state.verification_email = Some(pending.email.clone());
        self.state.pending = Some(pending);
        self.state.code = Some(code);

        self.state.signup_form = SignupForm::default();
        self.state.password_checks = PasswordChecks::default();
        Ok(())
    }

    /// Log in without any credential check.
    ///
    /// # Errors
    /// Returns an error if a required field is missing or storage fails.
    pub fn submit_login(&mut self) -> Result<(), FlowError> {
        self.state.login_form.validate()?;
        let LoginForm {
            email, remember_me, ..
        } = std::mem::take(&mut self.state.login_form);

        info!(%email, remember_me, "login submitted");
        self.prompter.notify(LOGIN_SUCCESS);

        self.store.persist_login(&email, None)?;
        self.reconcile_layout()?;
        self.state.modals.close(ModalId::Login);
        Ok(())
    }

    fn toggle_password(&mut self, field: PasswordField) {
        let revealed = self.state.password_visibility.toggle(field);
        debug!(?field, revealed, "password visibility toggled");
    }

    fn social_login(&mut self, provider: SocialProvider) {
        self.prompter.notify(&provider.placeholder_notice());
    }

    /// Compare the six cells with the issued code.
    ///
    /// # Errors
    /// `IncompleteCode` for fewer than six digits, `CodeMismatch` for a wrong
    /// code (cells are cleared and highlighted), or a storage failure.
    pub fn submit_verification(&mut self) -> Result<(), FlowError> {
        let candidate = self.state.cells.collected();
        let checked = match self.state.code.as_ref() {
            Some(code) => code.check(&candidate),
            None if candidate.len() != CODE_LEN => Err(FlowError::IncompleteCode),
            None => Err(FlowError::CodeMismatch),
        };

        if let Err(err) = checked {
            if matches!(err, FlowError::CodeMismatch) {
                self.state.cells.reject();
                self.scheduler
                    .schedule(self.config.error_highlight, TimerEvent::HighlightRevert);
            }
            return Err(err);
        }

        let Some(pending) = self.state.pending.take() else {
            // A code resent without a sign-up behind it can never log anyone in.
            self.state.code = None;
            self.state.cells.clear();
            return Err(FlowError::MissingElement("pending sign-up"));
        };

        info!(user = %pending, "user verified");
        self.prompter.notify(VERIFIED);

        self.store
            .persist_login(&pending.email, Some(&pending.name))?;
        self.reconcile_layout()?;
        self.state.modals.close(ModalId::Verification);
        self.state.cells.clear();
        self.state.code = None;
        self.state.verification_email = None;
        Ok(())
    }

    /// Issue a fresh code and start the resend cooldown.
    ///
    /// # Errors
    /// `ResendUnavailable` while the cooldown is running; nothing is issued.
    pub fn resend(&mut self) -> Result<(), FlowError> {
        self.state.resend.start(self.config.resend_cooldown_secs)?;

        let code = VerificationCode::issue(&mut self.rng);
        let email = self.state.pending.as_ref().map(|pending| pending.email.as_str());
        info!(?email, code = %code, "resending verification code");
        self.prompter.notify(&format!(
            "New verification code sent!\n\nFor demo purposes, your code is: {code}"
        ));
        self.state.code = Some(code);

        self.scheduler
            .schedule(self.config.resend_tick, TimerEvent::ResendTick);
        Ok(())
    }

    /// # Errors
    /// Returns an error if the stored keys cannot be removed.
    pub fn logout(&mut self) -> Result<(), FlowError> {
        self.store.clear()?;
        self.reconcile_layout()?;
        self.state.layout.dropdown_open = false;
        info!("logged out");
        self.prompter.notify(LOGGED_OUT);
        Ok(())
    }

    fn gate(&mut self) {
        let target = if self.prompter.confirm(LOGIN_PROMPT) {
            ModalId::Login
        } else {
            ModalId::Signup
        };
        debug!(%target, "feature gated behind login");
        self.state.modals.open(target);
    }

    fn showcase(&mut self, label: &str) -> Result<(), FlowError> {
        if self.store.is_logged_in()? {
            self.prompter.notify(&coming_soon_notice(label));
        } else {
            self.gate();
        }
        Ok(())
    }

    fn upload_video(&mut self) -> Result<Outcome, FlowError> {
        if self.store.is_logged_in()? {
            Ok(Outcome::OpenFilePicker)
        } else {
            self.gate();
            Ok(Outcome::Handled)
        }
    }

    fn video_selected(&mut self, file: &VideoFile) {
        info!(
            name = %file.name,
            size_mb = %file.size_mb(),
            mime = %file.mime_type,
            "video selected"
        );
        self.prompter.notify(&file.selection_notice());
    }
}
