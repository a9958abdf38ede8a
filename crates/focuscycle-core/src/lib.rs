//! # Focuscycle Core Library
//!
//! Core engine for guided focus sessions: timed work/break cycles with
//! reflective prompts at the boundaries and live progress rendered into a
//! persistent log. The CLI binary is a thin host layer over this library.
//!
//! ## Architecture
//!
//! - **Phase scheduler**: wall-clock state machine running one phase at a
//!   time, with a cancellable periodic ticker for progress updates
//! - **Session controller**: sequences work and break phases across cycles
//!   and writes debrief/plan markers into the session log
//! - **Host seam**: prompting, log writes, live display, and alerts are
//!   capabilities provided by the embedding application
//!
//! ## Key Components
//!
//! - [`SessionController`]: multi-cycle orchestration
//! - [`PhaseScheduler`]: single-phase timing and ticking
//! - [`Host`]: capability trait implemented by the embedder
//! - [`SessionConfig`]: immutable engine configuration

pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod options;
pub mod phase;
pub mod progress;
pub mod session;
pub mod setup;
pub mod timefmt;

pub use config::{BarConfig, QuestionsConfig, SessionConfig, TimingConfig};
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use host::{Host, LogTarget, PromptField};
pub use options::{cycle_options, start_time_options, SelectOption};
pub use phase::{Phase, PhaseKind, PhaseScheduler, PhaseState};
pub use progress::{render_bar, ProgressTick};
pub use session::{Session, SessionController};
pub use setup::{setup_session, SessionSetup};
pub use timefmt::{end_time_for_cycles, format_time};
