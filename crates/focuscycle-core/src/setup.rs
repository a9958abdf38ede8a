//! Prompt-driven session setup.
//!
//! Three prompts, in order: start time select, cycle count select, then
//! the initial reflection questions as a free-text form. Cancelling any of
//! them aborts setup before a session exists.

use chrono::{DateTime, Local};

use crate::config::SessionConfig;
use crate::error::{CoreError, Result};
use crate::host::{Host, PromptField};
use crate::options::{cycle_options, start_time_options, SelectOption};
use crate::session::Session;

/// Outcome of a completed setup flow.
#[derive(Debug, Clone)]
pub struct SessionSetup {
    pub session: Session,
    /// One answer per initial question, in question order.
    pub answers: Vec<String>,
}

/// Walk the user through session configuration.
///
/// # Errors
///
/// `SetupAborted` if any prompt is cancelled; `InvalidSelection` if the
/// host returns an answer that matches no offered option.
pub fn setup_session(
    host: &dyn Host,
    config: &SessionConfig,
    now: DateTime<Local>,
) -> Result<SessionSetup> {
    let start = prompt_select(
        host,
        "Focus Cycle Configuration",
        "Start Time",
        &start_time_options(now),
    )?;
    let cycles = prompt_select(
        host,
        "Focus Cycle Configuration",
        "Number of Cycles",
        &cycle_options(start, config),
    )?;
    let answers = prompt_initial_questions(host, config)?;
    Ok(SessionSetup {
        session: Session::new(start, cycles),
        answers,
    })
}

/// Offer `options` as a single select and resolve the answered index back
/// to its value.
fn prompt_select<T: Clone>(
    host: &dyn Host,
    title: &str,
    label: &'static str,
    options: &[SelectOption<T>],
) -> Result<T> {
    let field = PromptField::Select {
        label: label.to_string(),
        options: options.iter().map(|o| o.label.clone()).collect(),
    };
    let answers = host
        .prompt(title, &[field])?
        .ok_or(CoreError::SetupAborted)?;
    let raw = answers.first().ok_or(CoreError::SetupAborted)?;
    let index: usize = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidSelection {
            field: label,
            value: raw.clone(),
        })?;
    options
        .get(index)
        .map(|o| o.value.clone())
        .ok_or(CoreError::InvalidSelection {
            field: label,
            value: raw.clone(),
        })
}

fn prompt_initial_questions(host: &dyn Host, config: &SessionConfig) -> Result<Vec<String>> {
    let fields: Vec<PromptField> = config
        .questions
        .initial
        .iter()
        .map(|q| PromptField::Text { label: q.clone() })
        .collect();
    host.prompt("Initial Questions", &fields)?
        .ok_or(CoreError::SetupAborted)
}
