//! Multi-cycle session orchestration.
//!
//! The controller owns the session state and runs exactly one phase at a
//! time: work, then break, cycle after cycle, with no break after the final
//! cycle. Between phases it writes debrief/plan markers into the session
//! log and raises alerts through the host. Phase timing is wall-clock
//! driven, so in-session log and alert failures are best-effort: they are
//! reported and the cycle sequence continues regardless.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::events::Event;
use crate::host::{Host, LogTarget};
use crate::phase::{Phase, PhaseKind, PhaseScheduler, PhaseState};
use crate::timefmt::{format_time, format_timestamp};

/// A confirmed focus session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub start_time: DateTime<Local>,
    pub cycle_count: u32,
    current_cycle: u32,
}

impl Session {
    pub fn new(start_time: DateTime<Local>, cycle_count: u32) -> Self {
        Self {
            start_time,
            cycle_count,
            current_cycle: 0,
        }
    }

    /// Zero-based index of the cycle currently running (or next to run).
    pub fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    pub fn is_complete(&self) -> bool {
        self.current_cycle >= self.cycle_count
    }

    fn advance_cycle(&mut self) {
        self.current_cycle = (self.current_cycle + 1).min(self.cycle_count);
    }

    /// All phases of the session in run order. Phases tile without gaps;
    /// the final cycle has no break phase.
    pub fn phase_plan(&self, config: &SessionConfig) -> Vec<Phase> {
        let mut phases = Vec::new();
        let mut cycle_start = self.start_time;
        for index in 0..self.cycle_count {
            let work = Phase::new(PhaseKind::Work, index, cycle_start, config.work_duration());
            let rest = Phase::new(PhaseKind::Break, index, work.end, config.break_duration());
            cycle_start = rest.end;
            phases.push(work);
            if index + 1 < self.cycle_count {
                phases.push(rest);
            }
        }
        phases
    }
}

/// Orchestrates a full multi-cycle session against a host.
pub struct SessionController {
    config: SessionConfig,
    scheduler: PhaseScheduler,
    host: Arc<dyn Host>,
    events: Option<UnboundedSender<Event>>,
}

impl SessionController {
    pub fn new(config: SessionConfig, host: Arc<dyn Host>) -> Self {
        let scheduler = PhaseScheduler::new(&config);
        Self {
            config,
            scheduler,
            host,
            events: None,
        }
    }

    /// Attach an event sink; every session/phase transition and progress
    /// tick is reported through it.
    pub fn with_event_sink(mut self, events: UnboundedSender<Event>) -> Self {
        self.events = Some(events);
        self
    }

    /// Token that shuts the session down when cancelled. Unused in normal
    /// operation; there is no in-band pause/abort.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.scheduler.cancellation_token()
    }

    /// Run the session to completion.
    ///
    /// Writes the initial log entry, then drives every phase of the plan.
    /// A zero-cycle session is valid: the initial entry is still written
    /// and no phase runs. Returns the finished session state.
    ///
    /// # Errors
    ///
    /// Setup-time host failures (resolving the log target, writing the
    /// initial entry) abort the session before any phase runs. In-session
    /// host failures do not.
    pub async fn run_session(&self, mut session: Session, answers: &[String]) -> Result<Session> {
        let target = self.host.resolve_or_create_log_target("focus")?;
        let entry = initial_entry(&session, answers, &self.config, Local::now());
        self.host.append_text(&target, &entry)?;

        tracing::info!(
            cycles = session.cycle_count,
            start = %format_time(session.start_time),
            "session started"
        );
        self.emit(Event::SessionStarted {
            cycle_count: session.cycle_count,
            at: Utc::now(),
        });

        for phase in session.phase_plan(&self.config) {
            self.emit(Event::PhaseStarted {
                cycle_index: phase.cycle_index,
                kind: phase.kind,
                duration_secs: phase.duration_total().as_secs(),
                at: Utc::now(),
            });

            let state = self
                .scheduler
                .run_phase(
                    &phase,
                    self.host.clone(),
                    target.clone(),
                    self.events.as_ref(),
                )
                .await;
            if state != PhaseState::Completed {
                tracing::info!("session cancelled");
                return Ok(session);
            }

            self.emit(Event::PhaseCompleted {
                cycle_index: phase.cycle_index,
                kind: phase.kind,
                at: Utc::now(),
            });

            let cycle = phase.cycle_index + 1;
            match phase.kind {
                PhaseKind::Work => {
                    self.notify_best_effort(&format!(
                        "Cycle {cycle}: Work phase completed. Take a break!"
                    ));
                    self.append_best_effort(&target, &debrief_marker(cycle, &self.config));
                    if cycle == session.cycle_count {
                        self.append_best_effort(&target, "- Session debrief:");
                        self.notify_best_effort("Session complete. Debrief and relax.");
                        session.advance_cycle();
                    } else {
                        self.append_best_effort(&target, &plan_marker(cycle + 1, &self.config));
                    }
                }
                PhaseKind::Break => {
                    self.notify_best_effort(&format!(
                        "Cycle {cycle}: Break phase completed. Start working!"
                    ));
                    session.advance_cycle();
                }
            }
        }

        tracing::info!(cycles = session.cycle_count, "session completed");
        self.emit(Event::SessionCompleted {
            cycle_count: session.cycle_count,
            at: Utc::now(),
        });
        Ok(session)
    }

    fn emit(&self, event: Event) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }

    fn append_best_effort(&self, target: &LogTarget, text: &str) {
        if let Err(e) = self.host.append_text(target, text) {
            tracing::warn!(error = %e, "log append failed, continuing");
        }
    }

    fn notify_best_effort(&self, message: &str) {
        if let Err(e) = self.host.notify(message) {
            tracing::warn!(error = %e, "alert failed, continuing");
        }
    }
}

/// Initial session log entry: timestamped header plus the initial
/// questions with their answers as nested bullets.
fn initial_entry(
    session: &Session,
    answers: &[String],
    config: &SessionConfig,
    now: DateTime<Local>,
) -> String {
    let mut lines = vec![format!(
        "- **[{}]** Focus session starting {} for {} cycles",
        format_timestamp(now),
        format_time(session.start_time),
        session.cycle_count,
    )];
    for (i, question) in config.questions.initial.iter().enumerate() {
        lines.push(format!("  - **{question}**"));
        let answer = answers.get(i).map(String::as_str).unwrap_or("");
        lines.push(format!("    - {answer}"));
    }
    lines.join("\n")
}

/// `- Cycle {n} debrief:` with the cycle-end questions to fill in.
fn debrief_marker(cycle: u32, config: &SessionConfig) -> String {
    let mut lines = vec![format!("- Cycle {cycle} debrief:")];
    for question in &config.questions.cycle_end {
        lines.push(format!("  - {question}"));
    }
    lines.join("\n")
}

/// `- Cycle {n} plan:` with the cycle-start questions to fill in.
fn plan_marker(cycle: u32, config: &SessionConfig) -> String {
    let mut lines = vec![format!("- Cycle {cycle} plan:")];
    for question in &config.questions.cycle_start {
        lines.push(format!("  - {question}"));
    }
    lines.join("\n")
}
