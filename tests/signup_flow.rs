use paddlecoach::flow::{
    credentials::{Requirement, SignupField},
    layout::{PageLayout, Section},
    session::{KEY_LOGGED_IN, KEY_USER_EMAIL, KEY_USER_NAME},
    FlowConfig, FlowController, FlowError, ModalId, Outcome, ScriptedPrompter, TimerQueue,
    UiAction,
};
use paddlecoach::storage::{MemoryStorage, Storage};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

type Controller = FlowController<MemoryStorage, ScriptedPrompter>;

fn controller_with(storage: MemoryStorage, prompter: ScriptedPrompter) -> Controller {
    FlowController::with_parts(
        FlowConfig::default(),
        storage,
        prompter,
        TimerQueue::new(),
        StdRng::seed_from_u64(2024),
        PageLayout::landing(),
    )
    .expect("memory storage never fails")
}

fn controller() -> Controller {
    controller_with(MemoryStorage::new(), ScriptedPrompter::new())
}

fn sign_up(controller: &mut Controller, password: &str) -> Result<Outcome, FlowError> {
    controller
        .dispatch(UiAction::Open(ModalId::Signup))
        .expect("open");
    for (field, value) in [
        (SignupField::Name, "Ana"),
        (SignupField::Email, "ana@example.com"),
        (SignupField::Password, password),
        (SignupField::Confirm, password),
    ] {
        controller
            .dispatch(UiAction::SignupInput(field, value.to_string()))
            .expect("edit");
    }
    controller.dispatch(UiAction::SubmitSignup)
}

fn issued(controller: &Controller) -> String {
    controller
        .state()
        .code
        .as_ref()
        .map(|code| code.as_str().to_string())
        .expect("code issued")
}

fn enter(controller: &mut Controller, code: &str) {
    for (cell, digit) in code.chars().enumerate() {
        controller
            .dispatch(UiAction::DigitInput {
                cell,
                value: digit.to_string(),
            })
            .expect("digit");
    }
}

#[test]
fn valid_signup_and_code_logs_the_user_in() {
    let mut controller = controller();
    sign_up(&mut controller, "Abcdefg1").expect("valid signup");
    assert_eq!(
        controller.state().modals.visible(),
        Some(ModalId::Verification)
    );

    let code = issued(&controller);
    assert_eq!(code.len(), 6);
    let value: u32 = code.parse().expect("numeric code");
    assert!((100_000..=999_999).contains(&value));

    enter(&mut controller, &code);
    assert_eq!(controller.state().cells.focus(), 5);
    controller
        .dispatch(UiAction::SubmitVerification)
        .expect("verified");

    let storage = controller.store().storage();
    assert_eq!(storage.get(KEY_LOGGED_IN).expect("get"), Some("true".into()));
    assert_eq!(
        storage.get(KEY_USER_EMAIL).expect("get"),
        Some("ana@example.com".into())
    );
    assert_eq!(storage.get(KEY_USER_NAME).expect("get"), Some("Ana".into()));

    let state = controller.state();
    assert!(state.pending.is_none());
    assert!(state.code.is_none());
    assert_eq!(state.modals.visible(), None);
    assert!(!state.modals.scroll_locked());
    assert_eq!(state.layout.display_name(), "Ana");
    assert!(!state.layout.hero_visible);
    assert!(state.layout.user_menu_visible);
    assert!(!state.layout.nav_buttons_visible);
    assert_eq!(state.layout.sections()[0], Section::CoreFeatures);
    assert_eq!(
        controller.prompter().last_notice(),
        Some("Email verified successfully! Welcome to PaddleCoach!")
    );
}

#[test]
fn weak_password_is_rejected_with_every_unmet_rule() {
    let mut controller = controller();
    let result = sign_up(&mut controller, "abcdefgh");

    assert!(matches!(
        result,
        Err(FlowError::WeakPassword(ref unmet))
            if unmet == &vec![Requirement::Uppercase, Requirement::Number]
    ));
    let notice = controller.prompter().last_notice().expect("shown");
    assert!(notice.starts_with("Password does not meet all requirements!"));
    assert!(notice.contains("- One uppercase letter"));
    assert!(notice.contains("- One number"));
    assert!(!notice.contains("At least 8 characters"));

    assert_eq!(controller.state().modals.visible(), Some(ModalId::Signup));
    assert!(controller.state().pending.is_none());
    assert!(controller.state().code.is_none());
    assert!(controller.store().storage().is_empty());
}

#[test]
fn each_missing_rule_is_rejected_alone() {
    for password in ["Abcdefg", "abcdefg1", "ABCDEFG1", "Abcdefgh"] {
        let mut controller = controller();
        let result = sign_up(&mut controller, password);
        assert!(
            matches!(result, Err(FlowError::WeakPassword(ref unmet)) if unmet.len() == 1),
            "{password} should fail exactly one rule"
        );
        assert!(!controller.session().expect("session").is_logged_in);
    }
}

#[test]
fn wrong_code_clears_and_highlights_the_cells() {
    let mut controller = controller();
    sign_up(&mut controller, "Abcdefg1").expect("signup");
    let code = issued(&controller);
    let wrong = if code == "111111" { "222222" } else { "111111" };

    enter(&mut controller, wrong);
    let result = controller.dispatch(UiAction::SubmitVerification);

    assert!(matches!(result, Err(FlowError::CodeMismatch)));
    assert_eq!(
        controller.prompter().last_notice(),
        Some("Invalid verification code. Please try again.")
    );
    let cells = &controller.state().cells;
    assert!(cells.is_empty());
    assert_eq!(cells.focus(), 0);
    assert!(cells.is_highlighted());
    assert_eq!(issued(&controller), code);

    controller.advance(Duration::from_millis(999));
    assert!(controller.state().cells.is_highlighted());
    controller.advance(Duration::from_millis(1));
    assert!(!controller.state().cells.is_highlighted());

    enter(&mut controller, &code);
    controller
        .dispatch(UiAction::SubmitVerification)
        .expect("retry succeeds");
    assert!(controller.session().expect("session").is_logged_in);
}

#[test]
fn leaving_verification_discards_the_pending_signup() {
    let abandon = [
        UiAction::Close(ModalId::Verification),
        UiAction::Backdrop(ModalId::Verification),
        UiAction::CloseAll,
        UiAction::Open(ModalId::Login),
    ];
    for action in abandon {
        let mut controller = controller();
        sign_up(&mut controller, "Abcdefg1").expect("signup");
        let code = issued(&controller);
        controller
            .dispatch(UiAction::DigitInput {
                cell: 0,
                value: "1".to_string(),
            })
            .expect("digit");

        controller.dispatch(action.clone()).expect("leave");

        let state = controller.state();
        assert!(state.pending.is_none(), "{action:?} keeps the sign-up");
        assert!(state.code.is_none(), "{action:?} keeps the code");
        assert!(state.verification_email.is_none());
        assert!(state.cells.is_empty());

        controller
            .dispatch(UiAction::Open(ModalId::Verification))
            .expect("reopen");
        controller
            .dispatch(UiAction::Paste {
                cell: 0,
                text: code,
            })
            .expect("paste");
        assert!(controller.dispatch(UiAction::SubmitVerification).is_err());
        assert!(!controller.session().expect("session").is_logged_in);
        assert!(controller.store().storage().is_empty());
    }
}

#[test]
fn pasting_six_digits_fills_every_cell() {
    let mut controller = controller();
    sign_up(&mut controller, "Abcdefg1").expect("signup");

    controller
        .dispatch(UiAction::Paste {
            cell: 3,
            text: "123456".to_string(),
        })
        .expect("paste");

    let cells = &controller.state().cells;
    assert_eq!(cells.collected(), "123456");
    assert_eq!(cells.digit(0), Some('1'));
    assert_eq!(cells.digit(5), Some('6'));
    assert_eq!(cells.focus(), 5);
}

#[test]
fn non_numeric_paste_is_ignored() {
    let mut controller = controller();
    sign_up(&mut controller, "Abcdefg1").expect("signup");

    controller
        .dispatch(UiAction::Paste {
            cell: 0,
            text: "12a456".to_string(),
        })
        .expect("paste");
    assert!(controller.state().cells.is_empty());
}

#[test]
fn resend_issues_a_new_code_and_locks_for_thirty_seconds() {
    let mut controller = controller();
    sign_up(&mut controller, "Abcdefg1").expect("signup");
    let first = issued(&controller);

    controller.dispatch(UiAction::Resend).expect("resend");
    let second = issued(&controller);
    assert_ne!(first, second, "seeded generator yields a fresh code");
    assert!(controller
        .prompter()
        .last_notice()
        .is_some_and(|notice| notice.ends_with(&second)));
    assert!(!controller.state().resend.is_enabled());

    controller.advance(Duration::from_secs(29));
    assert!(matches!(
        controller.dispatch(UiAction::Resend),
        Err(FlowError::ResendUnavailable { remaining: 1 })
    ));
    assert_eq!(issued(&controller), second);

    controller.advance(Duration::from_secs(1));
    assert!(controller.state().resend.is_enabled());
    controller.dispatch(UiAction::Resend).expect("enabled again");
    assert_eq!(controller.state().resend.label(), "Resend in 30s");

    // The old code no longer verifies.
    let current = issued(&controller);
    if first != current {
        enter(&mut controller, &first);
        assert!(matches!(
            controller.dispatch(UiAction::SubmitVerification),
            Err(FlowError::CodeMismatch)
        ));
    }
}

#[test]
fn gated_features_ask_before_opening_a_modal() {
    let mut prompter = ScriptedPrompter::new();
    prompter.push_answer(true);
    prompter.push_answer(false);
    let mut controller = controller_with(MemoryStorage::new(), prompter);

    controller
        .dispatch(UiAction::Showcase("Shot Analysis".to_string()))
        .expect("showcase");
    assert_eq!(controller.state().modals.visible(), Some(ModalId::Login));

    let outcome = controller.dispatch(UiAction::UploadVideo).expect("upload");
    assert_eq!(outcome, Outcome::Handled);
    assert_eq!(controller.state().modals.visible(), Some(ModalId::Signup));
    assert_eq!(controller.prompter().questions().len(), 2);
}

#[test]
fn logged_in_users_reach_the_features() {
    let mut controller = controller();
    sign_up(&mut controller, "Abcdefg1").expect("signup");
    let code = issued(&controller);
    enter(&mut controller, &code);
    controller
        .dispatch(UiAction::SubmitVerification)
        .expect("verified");

    controller
        .dispatch(UiAction::Showcase("Shot Analysis".to_string()))
        .expect("showcase");
    assert!(controller
        .prompter()
        .last_notice()
        .is_some_and(|notice| notice.starts_with("Shot Analysis feature will be available soon!")));
    assert!(controller.prompter().questions().is_empty());

    assert_eq!(
        controller.dispatch(UiAction::UploadVideo).expect("upload"),
        Outcome::OpenFilePicker
    );
}
