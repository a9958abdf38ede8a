//! Phase state machine and tick scheduling.
//!
//! A phase is one timed interval of work or rest. Running it interleaves
//! two cooperative activities:
//! - a periodic ticker that rewrites the live progress display, and
//! - a one-shot waiter suspended until the phase's end time.
//!
//! ```text
//! Idle -> Running -> Completed
//! ```
//!
//! The ticker is a spawned task owned by a handle holding a
//! `CancellationToken` (child of the scheduler-wide token, so embedders can
//! shut the whole session down). On completion the ticker is cancelled and
//! joined *before* any completion effect runs: at most one timer is ever
//! active, and no tick is observed after a phase has completed. Ticks are
//! best-effort; a failed display update is logged and the phase continues.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::{BarConfig, SessionConfig};
use crate::events::Event;
use crate::host::{Host, LogTarget};
use crate::progress::{render_bar, ProgressTick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Work,
    Break,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Work => "work",
            PhaseKind::Break => "break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseState {
    Idle,
    Running,
    Completed,
}

/// One timed interval within a cycle. Derived from session state; phases
/// tile without gaps (`next.start == previous.end`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub kind: PhaseKind,
    /// Zero-based cycle this phase belongs to.
    pub cycle_index: u32,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    total: StdDuration,
}

impl Phase {
    pub fn new(
        kind: PhaseKind,
        cycle_index: u32,
        start: DateTime<Local>,
        duration: chrono::Duration,
    ) -> Self {
        Self {
            kind,
            cycle_index,
            start,
            end: start + duration,
            total: duration.to_std().unwrap_or_default(),
        }
    }

    /// Fixed total duration of the phase.
    pub fn duration_total(&self) -> StdDuration {
        self.total
    }

    /// Time left until the end of the phase, floored at zero. An end time
    /// already in the past resolves to an immediate completion.
    pub fn remaining_from(&self, now: DateTime<Local>) -> StdDuration {
        (self.end - now).to_std().unwrap_or_default()
    }
}

/// Runs single phases to completion with a cancellable periodic ticker.
pub struct PhaseScheduler {
    update_interval: StdDuration,
    bar: BarConfig,
    cancel: CancellationToken,
}

impl PhaseScheduler {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            update_interval: config.update_interval(),
            bar: config.bar.clone(),
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the scheduler (and any running phase) when
    /// cancelled. There is no in-band pause/abort; this exists for
    /// embedder shutdown.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run `phase` until its end time.
    ///
    /// Returns `Completed` once the end time is reached and the ticker is
    /// torn down, or `Running` if the scheduler was cancelled first.
    pub async fn run_phase(
        &self,
        phase: &Phase,
        host: Arc<dyn Host>,
        live: LogTarget,
        events: Option<&UnboundedSender<Event>>,
    ) -> PhaseState {
        let deadline = Instant::now() + phase.remaining_from(Local::now());
        tracing::info!(
            kind = phase.kind.as_str(),
            cycle = phase.cycle_index + 1,
            until = %crate::timefmt::format_time(phase.end),
            "phase running"
        );

        let ticker = self.spawn_ticker(phase.clone(), host, live, deadline, events.cloned());
        let completed = tokio::select! {
            _ = tokio::time::sleep_until(deadline) => true,
            _ = self.cancel.cancelled() => false,
        };
        // Tear the ticker down before any completion effect runs.
        ticker.shutdown().await;

        if completed {
            tracing::info!(
                kind = phase.kind.as_str(),
                cycle = phase.cycle_index + 1,
                "phase completed"
            );
            PhaseState::Completed
        } else {
            PhaseState::Running
        }
    }

    fn spawn_ticker(
        &self,
        phase: Phase,
        host: Arc<dyn Host>,
        live: LogTarget,
        deadline: Instant,
        events: Option<UnboundedSender<Event>>,
    ) -> TickerHandle {
        let cancel = self.cancel.child_token();
        let token = cancel.clone();
        let update = self.update_interval;
        let bar = self.bar.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(update);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // An interval fires immediately; swallow that so the first tick
            // lands one update after phase start, not at it.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    fired = interval.tick() => {
                        // Last tick is strictly before the end time.
                        if fired >= deadline {
                            break;
                        }
                        let tick = ProgressTick::new(phase.duration_total(), deadline - fired);
                        let elapsed = phase.duration_total().saturating_sub(tick.remaining);
                        let message = format!(
                            "- Cycle {} {} phase remaining time: {} minutes\n{}\n",
                            phase.cycle_index + 1,
                            phase.kind.as_str(),
                            tick.remaining_minutes(),
                            render_bar(phase.duration_total(), elapsed, &bar),
                        );
                        if let Err(e) = host.replace_live_text(&live, &message) {
                            tracing::warn!(error = %e, "progress update failed, phase continues");
                        }
                        if let Some(tx) = &events {
                            let _ = tx.send(Event::ProgressTicked {
                                cycle_index: phase.cycle_index,
                                kind: phase.kind,
                                remaining_minutes: tick.remaining_minutes(),
                                at: Utc::now(),
                            });
                        }
                    }
                }
            }
        });

        TickerHandle { cancel, task }
    }
}

/// Handle owning a spawned ticker task.
struct TickerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Cancel the ticker and wait for it to exit. After this returns no
    /// further tick can be emitted.
    async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}
