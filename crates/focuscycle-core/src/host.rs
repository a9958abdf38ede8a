//! Host capability seam.
//!
//! The engine never talks to a screen, a note store, or a notification
//! service directly. Everything outward goes through [`Host`], which the
//! embedding layer implements (the CLI ships a terminal host; tests use a
//! recording mock). Host methods are synchronous side effects; all
//! suspension lives in the engine's timers.

use crate::error::Result;

/// Opaque identifier for a log destination. The engine never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogTarget(String);

impl LogTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One input in a prompt form.
#[derive(Debug, Clone)]
pub enum PromptField {
    /// Free text entry.
    Text { label: String },
    /// Pick one of `options`; the answer is the chosen zero-based index,
    /// rendered as a decimal string.
    Select { label: String, options: Vec<String> },
}

/// Capabilities the host application provides to the engine.
pub trait Host: Send + Sync {
    /// Show a form and collect one answer per field. `Ok(None)` means the
    /// user cancelled.
    fn prompt(&self, title: &str, fields: &[PromptField]) -> Result<Option<Vec<String>>>;

    /// Append text to a persistent log. The engine never reads it back.
    fn append_text(&self, target: &LogTarget, text: &str) -> Result<()>;

    /// Replace the transient live-progress region with new text.
    fn replace_live_text(&self, target: &LogTarget, text: &str) -> Result<()>;

    /// Fire-and-forget user alert.
    fn notify(&self, message: &str) -> Result<()>;

    /// Idempotently locate or create the log destination for `tag`.
    fn resolve_or_create_log_target(&self, tag: &str) -> Result<LogTarget>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording host for engine tests.

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use super::{Host, LogTarget, PromptField};
    use crate::error::{CoreError, Result};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum HostCall {
        Prompt(String),
        Append(String),
        Live(String),
        Notify(String),
        Resolve(String),
    }

    /// Host that records every call in order and answers prompts from a
    /// script.
    #[derive(Default)]
    pub struct RecordingHost {
        calls: Mutex<Vec<HostCall>>,
        prompt_script: Mutex<VecDeque<Option<Vec<String>>>>,
        fail_live: AtomicBool,
        fail_append: AtomicBool,
        fail_notify: AtomicBool,
    }

    impl RecordingHost {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue an answer for the next prompt; `None` simulates cancel.
        pub fn script_prompt(&self, answer: Option<Vec<String>>) {
            self.prompt_script.lock().unwrap().push_back(answer);
        }

        pub fn fail_live(&self) {
            self.fail_live.store(true, Ordering::SeqCst);
        }

        pub fn fail_append(&self) {
            self.fail_append.store(true, Ordering::SeqCst);
        }

        pub fn fail_notify(&self) {
            self.fail_notify.store(true, Ordering::SeqCst);
        }

        pub fn calls(&self) -> Vec<HostCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
        }

        /// All appended text joined, for marker assertions.
        pub fn appended(&self) -> String {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter_map(|c| match c {
                    HostCall::Append(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n")
        }

        fn record(&self, call: HostCall) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Host for RecordingHost {
        fn prompt(&self, title: &str, _fields: &[PromptField]) -> Result<Option<Vec<String>>> {
            self.record(HostCall::Prompt(title.to_string()));
            Ok(self
                .prompt_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(None))
        }

        fn append_text(&self, _target: &LogTarget, text: &str) -> Result<()> {
            if self.fail_append.load(Ordering::SeqCst) {
                return Err(CoreError::host("append_text", "scripted failure"));
            }
            self.record(HostCall::Append(text.to_string()));
            Ok(())
        }

        fn replace_live_text(&self, _target: &LogTarget, text: &str) -> Result<()> {
            if self.fail_live.load(Ordering::SeqCst) {
                return Err(CoreError::host("replace_live_text", "scripted failure"));
            }
            self.record(HostCall::Live(text.to_string()));
            Ok(())
        }

        fn notify(&self, message: &str) -> Result<()> {
            if self.fail_notify.load(Ordering::SeqCst) {
                return Err(CoreError::host("notify", "scripted failure"));
            }
            self.record(HostCall::Notify(message.to_string()));
            Ok(())
        }

        fn resolve_or_create_log_target(&self, tag: &str) -> Result<LogTarget> {
            self.record(HostCall::Resolve(tag.to_string()));
            Ok(LogTarget::new(format!("target:{tag}")))
        }
    }
}
