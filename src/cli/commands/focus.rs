//! Foreground focus commands: `start`, `pomodoro` and `menu`.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::args::{OutputFormat, PomodoroArgs};
use crate::error::AlfredError;
use crate::focus::{
    format_minutes, prompt_positive, run_until_done, PomodoroController, PomodoroPlan, RunOutcome,
    Session, SessionController,
};
use crate::menu::{self, App, ConsolePresenter};
use crate::output::to_json;
use crate::system::{shortcut, CommandRunner, MacSystem};

/// Summary printed when a foreground run ends.
#[derive(Debug, Serialize)]
struct RunReport {
    mode: &'static str,
    outcome: RunOutcome,
    started_at: DateTime<Local>,
    ended_at: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<PomodoroPlan>,
}

type ConsoleController = PomodoroController<MacSystem, ConsolePresenter<Box<dyn Write>>>;

/// Focus for `minutes` in the foreground.
///
/// # Errors
///
/// Returns an error for a zero duration, a missing shortcut, or if the
/// Ctrl+C handler cannot be installed.
pub fn start(ctx: &Context, minutes: u32) -> Result<String, AlfredError> {
    Session::from_minutes(minutes)?;
    require_shortcut(&ctx.runner(), &ctx.config.shortcut.name)?;
    let cancel = cancel_on_ctrlc()?;

    let mut controller = console_controller(ctx);
    let started_at = Local::now();
    if ctx.format == OutputFormat::Pretty {
        let until = started_at + chrono::Duration::minutes(i64::from(minutes));
        println!(
            "{} {} (until {}). Ctrl+C ends early.",
            "Focusing for".bold(),
            format_minutes(minutes),
            until.format("%H:%M")
        );
    }

    controller.sessions_mut().start(minutes)?;
    let outcome = run_until_done(&mut controller, &cancel);

    let report = RunReport {
        mode: "focus",
        outcome,
        started_at,
        ended_at: Local::now(),
        minutes: Some(minutes),
        plan: None,
    };
    match ctx.format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(match outcome {
            RunOutcome::Completed => format!(
                "{} {}",
                "Focus complete:".green().bold(),
                format_minutes(minutes)
            ),
            RunOutcome::Cancelled => format!(
                "{} after {}",
                "Focus ended early".yellow().bold(),
                elapsed(&report)
            ),
        }),
    }
}

/// Run Pomodoro cycles, asking for any value not given as a flag.
///
/// # Errors
///
/// Returns an error for invalid or missing answers, a missing shortcut,
/// or if the Ctrl+C handler cannot be installed.
pub fn pomodoro(ctx: &Context, args: &PomodoroArgs) -> Result<String, AlfredError> {
    let (session, count, brk) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stderr();
        let mut ask = |given: Option<u32>, question: &str| match given {
            Some(value) => Ok(value),
            None => prompt_positive(&mut input, &mut output, question),
        };
        (
            ask(args.session, "Session length (min):")?,
            ask(args.count, "Number of sessions:")?,
            ask(args.break_minutes, "Break length (min):")?,
        )
    };
    let plan = PomodoroPlan::new(session, count, brk)?;

    require_shortcut(&ctx.runner(), &ctx.config.shortcut.name)?;
    let cancel = cancel_on_ctrlc()?;

    let mut controller = console_controller(ctx);
    let started_at = Local::now();
    if ctx.format == OutputFormat::Pretty {
        println!(
            "{} {count} x {}, {} breaks. Ctrl+C ends early.",
            "Pomodoro:".bold(),
            format_minutes(session),
            format_minutes(brk)
        );
    }

    controller.configure(session, count, brk)?;
    controller.begin()?;
    let outcome = run_until_done(&mut controller, &cancel);

    let report = RunReport {
        mode: "pomodoro",
        outcome,
        started_at,
        ended_at: Local::now(),
        minutes: None,
        plan: Some(plan),
    };
    match ctx.format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Pretty => Ok(match outcome {
            RunOutcome::Completed => format!(
                "{} {count} session(s) done",
                "Pomodoro complete:".green().bold()
            ),
            RunOutcome::Cancelled => format!(
                "{} after {}",
                "Pomodoro ended early".yellow().bold(),
                elapsed(&report)
            ),
        }),
    }
}

/// Open the interactive menu.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up.
pub fn menu(ctx: &Context) -> Result<String, AlfredError> {
    let runner = ctx.runner();
    let installed = match shortcut::is_installed(&runner, &ctx.config.shortcut.name) {
        Ok(installed) => installed,
        Err(e) => {
            tracing::warn!(error = %e, "could not list shortcuts");
            false
        }
    };
    tracing::info!(installed, "opening focus menu");

    let mut app = App::new(ctx.system(), runner, &ctx.config, installed);
    menu::run(&mut app)?;
    Ok(String::new())
}

fn console_controller(ctx: &Context) -> ConsoleController {
    // Progress goes to stderr when stdout carries JSON.
    let out: Box<dyn Write> = match ctx.format {
        OutputFormat::Pretty => Box::new(io::stdout()),
        OutputFormat::Json => Box::new(io::stderr()),
    };
    PomodoroController::new(SessionController::new(ctx.system(), ConsolePresenter::new(out)))
}

fn require_shortcut<R: CommandRunner>(runner: &R, name: &str) -> Result<(), AlfredError> {
    if shortcut::is_installed(runner, name)? {
        Ok(())
    } else {
        Err(AlfredError::ShortcutNotInstalled(name.to_string()))
    }
}

fn cancel_on_ctrlc() -> Result<Arc<AtomicBool>, AlfredError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .map_err(|e| AlfredError::Config(format!("Failed to install Ctrl+C handler: {e}")))?;
    Ok(cancel)
}

fn elapsed(report: &RunReport) -> String {
    let minutes = (report.ended_at - report.started_at).num_minutes();
    if minutes < 1 {
        "less than a minute".to_string()
    } else {
        format_minutes(u32::try_from(minutes).unwrap_or(u32::MAX))
    }
}
