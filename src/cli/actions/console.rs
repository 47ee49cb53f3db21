use crate::{
    cli::{
        script::ScriptLine,
        terminal::{GateAnswer, TerminalPrompter},
    },
    flow::{FlowController, FlowError, Outcome, Prompter, Scheduler},
    storage::{FileStorage, MemoryStorage, Storage},
};
use anyhow::{Context, Result};
use rand::Rng;
use serde_json::{json, Value};
use std::{path::PathBuf, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    time::Instant,
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub storage: PathBuf,
    pub ephemeral: bool,
    pub script: Option<PathBuf>,
    pub gate_answer: GateAnswer,
}

/// What the driver does after a line was handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Wait(Duration),
    Quit,
}

/// Execute the console action: read commands line by line and feed them to
/// the flow controller, delivering timers on the wall clock in between.
/// # Errors
/// Returns an error if the storage or the script cannot be opened, or reading
/// commands fails.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let storage: Box<dyn Storage> = if args.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(
            FileStorage::open(&args.storage)
                .with_context(|| format!("failed to open storage {}", args.storage.display()))?,
        )
    };

    let input: Box<dyn AsyncRead + Unpin + Send> = match &args.script {
        Some(path) => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open script {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdin()),
    };

    let mut controller =
        FlowController::new(storage, TerminalPrompter::stdout(args.gate_answer))?;
    let mut lines = BufReader::new(input).lines();
    let started = Instant::now();
    let mut resend_label = controller.state().resend.label();

    loop {
        let deadline = controller.scheduler().next_deadline();

        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read command")?,
            () = until_deadline(started, deadline) => {
                controller.advance_to(started.elapsed());
                print_resend_label(&controller, &mut resend_label);
                continue;
            }
        };

        let Some(line) = line else {
            debug!("end of input");
            break;
        };

        controller.advance_to(started.elapsed());
        match step(&mut controller, &line)? {
            Step::Continue => {}
            Step::Wait(duration) => {
                tokio::time::sleep(duration).await;
                controller.advance_to(started.elapsed());
            }
            Step::Quit => break,
        }
        print_resend_label(&controller, &mut resend_label);
    }

    Ok(())
}

/// Handle one command line. Flow errors are printed and swallowed; only a
/// failure to print the status escapes.
/// # Errors
/// Returns an error if the status cannot be rendered.
pub fn step<S, P, C, R>(controller: &mut FlowController<S, P, C, R>, line: &str) -> Result<Step>
where
    S: Storage,
    P: Prompter,
    C: Scheduler,
    R: Rng,
{
    let line = match ScriptLine::parse(line) {
        Ok(line) => line,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(Step::Continue);
        }
    };

    match line {
        ScriptLine::Quit => return Ok(Step::Quit),
        ScriptLine::Wait(duration) => return Ok(Step::Wait(duration)),
        ScriptLine::Status => {
            let status = status(controller)?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        line => {
            for action in line.actions() {
                match controller.dispatch(action) {
                    Ok(Outcome::Handled) => {}
                    Ok(Outcome::Ignored) => debug!("action had no effect"),
                    Ok(Outcome::OpenFilePicker) => println!(
                        "[picker] choose a match video with: video <name> <bytes> <mime>"
                    ),
                    // The remaining actions of a shorthand depend on this one.
                    Err(err) => {
                        if is_driver_error(&err) {
                            eprintln!("error: {err}");
                        }
                        break;
                    }
                }
            }
        }
    }

    Ok(Step::Continue)
}

/// Snapshot of the session and the visible page.
/// # Errors
/// Returns an error if the stored session cannot be read.
pub fn status<S, P, C, R>(controller: &FlowController<S, P, C, R>) -> Result<Value>
where
    S: Storage,
    P: Prompter,
    C: Scheduler,
    R: Rng,
{
    let session = controller.session()?;
    let state = controller.state();
    let layout = &state.layout;
    let sections: Vec<String> = layout.sections().iter().map(ToString::to_string).collect();

    Ok(json!({
        "session": session,
        "modal": state.modals.visible().map(|id| id.as_str()),
        "verificationEmail": state.verification_email,
        "cells": state.cells.collected(),
        "resend": state.resend.label(),
        "layout": {
            "sections": sections,
            "heroVisible": layout.hero_visible,
            "navButtonsVisible": layout.nav_buttons_visible,
            "userMenuVisible": layout.user_menu_visible,
            "userName": layout.display_name(),
            "dropdownOpen": layout.dropdown_open,
        },
    }))
}

// User-facing errors were already shown by the prompter and the rest are
// logged by the controller.
const fn is_driver_error(err: &FlowError) -> bool {
    matches!(
        err,
        FlowError::UnknownAction(_)
            | FlowError::UnknownModal(_)
            | FlowError::InvalidArgument(_)
            | FlowError::Storage(_)
    )
}

async fn until_deadline(started: Instant, deadline: Option<Duration>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(started + at).await,
        None => std::future::pending().await,
    }
}

fn print_resend_label<S, P, C, R>(controller: &FlowController<S, P, C, R>, last: &mut String)
where
    S: Storage,
    P: Prompter,
    C: Scheduler,
    R: Rng,
{
    let label = controller.state().resend.label();
    if label != *last {
        println!("[resend] {label}");
        *last = label;
    }
}

fn log_startup_args(args: &Args) {
    info!(
        storage = %args.storage.display(),
        ephemeral = args.ephemeral,
        script = ?args.script,
        gate_answer = %args.gate_answer,
        "starting console"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{
        layout::PageLayout, session::KEY_LOGGED_IN, FlowConfig, ScriptedPrompter, TimerQueue,
    };
    use rand::{rngs::StdRng, SeedableRng};

    type TestController = FlowController<MemoryStorage, ScriptedPrompter>;

    fn controller() -> TestController {
        FlowController::with_parts(
            FlowConfig::default(),
            MemoryStorage::new(),
            ScriptedPrompter::new(),
            TimerQueue::new(),
            StdRng::seed_from_u64(7),
            PageLayout::landing(),
        )
        .expect("memory storage never fails")
    }

    fn issued(controller: &TestController) -> String {
        controller
            .state()
            .code
            .as_ref()
            .map(|code| code.as_str().to_string())
            .expect("code issued")
    }

    #[test]
    fn driver_commands_map_to_steps() {
        let mut controller = controller();
        assert_eq!(step(&mut controller, "quit").ok(), Some(Step::Quit));
        assert_eq!(
            step(&mut controller, "wait 2").ok(),
            Some(Step::Wait(Duration::from_secs(2)))
        );
        assert_eq!(step(&mut controller, "# nothing").ok(), Some(Step::Continue));
        assert_eq!(step(&mut controller, "no-such-thing").ok(), Some(Step::Continue));
    }

    #[test]
    fn signup_and_code_lines_log_the_user_in() {
        let mut controller = controller();
        step(
            &mut controller,
            "signup Ana Maria ana@example.com Abcdefg1 Abcdefg1",
        )
        .expect("signup");
        let code = issued(&controller);

        step(&mut controller, &format!("code {code}")).expect("code");

        let session = controller.session().expect("session");
        assert!(session.is_logged_in);
        assert_eq!(session.user_name.as_deref(), Some("Ana Maria"));
        assert_eq!(
            controller.store().storage().get(KEY_LOGGED_IN).expect("get"),
            Some("true".to_string())
        );
    }

    #[test]
    fn a_failing_shorthand_stops_at_the_first_error() {
        let mut controller = controller();
        step(&mut controller, "signup Ana ana@example.com abcdefgh abcdefgh").expect("signup");
        assert!(controller.state().code.is_none());
        assert!(controller
            .prompter()
            .last_notice()
            .is_some_and(|notice| notice.contains("One uppercase letter")));
    }

    #[test]
    fn status_reports_session_and_layout() {
        let mut controller = controller();
        step(&mut controller, "login bo@example.com secret").expect("login");

        let status = status(&controller).expect("status");
        assert_eq!(status["session"]["isLoggedIn"], json!(true));
        assert_eq!(status["session"]["userEmail"], json!("bo@example.com"));
        assert_eq!(status["modal"], Value::Null);
        assert_eq!(status["layout"]["heroVisible"], json!(false));
        assert_eq!(status["layout"]["userMenuVisible"], json!(true));
        assert_eq!(status["resend"], json!("Resend Code"));
    }
}
