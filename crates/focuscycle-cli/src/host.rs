//! Terminal implementation of the host capabilities.
//!
//! - Prompts read from stdin: selects as numbered lists, free text line by
//!   line. An empty select answer or EOF cancels.
//! - The session log is a markdown file per target tag in the platform
//!   data dir (`~/.local/share/focuscycle/<tag>.md`).
//! - Live progress rewrites a single stderr line; alerts ring the bell.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use focuscycle_core::{CoreError, Host, LogTarget, PromptField, Result};

pub struct TerminalHost {
    data_dir: PathBuf,
}

impl TerminalHost {
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| CoreError::host("data_dir", "no data directory on this platform"))?
            .join("focuscycle");
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    #[cfg(test)]
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn log_path(&self, target: &LogTarget) -> PathBuf {
        self.data_dir.join(format!("{}.md", target.as_str()))
    }

    fn read_line() -> Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CoreError::host("prompt", e.to_string()))?;
        if read == 0 {
            return Ok(None); // EOF cancels.
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Host for TerminalHost {
    fn prompt(&self, title: &str, fields: &[PromptField]) -> Result<Option<Vec<String>>> {
        println!("\n{title}");
        let mut answers = Vec::with_capacity(fields.len());
        for field in fields {
            match field {
                PromptField::Select { label, options } => {
                    println!("{label}:");
                    for (i, option) in options.iter().enumerate() {
                        println!("  [{i}] {option}");
                    }
                    print!("> ");
                    io::stdout().flush().ok();
                    match Self::read_line()? {
                        None => return Ok(None),
                        Some(line) if line.is_empty() => return Ok(None),
                        Some(line) => answers.push(line),
                    }
                }
                PromptField::Text { label } => {
                    print!("{label}\n> ");
                    io::stdout().flush().ok();
                    match Self::read_line()? {
                        None => return Ok(None),
                        Some(line) => answers.push(line),
                    }
                }
            }
        }
        Ok(Some(answers))
    }

    fn append_text(&self, target: &LogTarget, text: &str) -> Result<()> {
        let path = self.log_path(target);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| CoreError::host("append_text", e.to_string()))?;
        writeln!(file, "{text}").map_err(|e| CoreError::host("append_text", e.to_string()))
    }

    fn replace_live_text(&self, _target: &LogTarget, text: &str) -> Result<()> {
        // Single-line live region: clear and rewrite in place.
        let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        eprint!("\r\x1b[2K{line}");
        io::stderr().flush().ok();
        Ok(())
    }

    fn notify(&self, message: &str) -> Result<()> {
        eprintln!("\x07\n{message}");
        Ok(())
    }

    fn resolve_or_create_log_target(&self, tag: &str) -> Result<LogTarget> {
        let target = LogTarget::new(tag);
        let path = self.log_path(&target);
        if !path.exists() {
            std::fs::write(&path, "# Focus\n\n")
                .map_err(|e| CoreError::host("resolve_or_create_log_target", e.to_string()))?;
        }
        Ok(target)
    }
}
