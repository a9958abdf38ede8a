use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use clap::Args;
use focuscycle_core::{
    end_time_for_cycles, format_time, setup_session, CoreError, Session, SessionConfig,
    SessionController, SessionSetup,
};

use crate::host::TerminalHost;

#[derive(Args)]
pub struct StartArgs {
    /// Number of cycles; skips the interactive setup
    #[arg(long)]
    pub cycles: Option<u32>,
    /// Start offset in minutes from now (with --cycles), may be negative
    #[arg(long, allow_negative_numbers = true, default_value = "0")]
    pub start_offset_min: i64,
    /// Pin "now" for scripted runs: HH:MM (today, local) or RFC 3339
    #[arg(long, value_name = "TIME")]
    pub now: Option<String>,
}

pub fn run(args: StartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = SessionConfig::load_or_default();
    config.validate()?;
    let host = Arc::new(TerminalHost::new()?);

    let now = match &args.now {
        Some(raw) => parse_now(raw)?,
        None => Local::now(),
    };

    let setup = match args.cycles {
        Some(cycles) => SessionSetup {
            session: Session::new(now + chrono::Duration::minutes(args.start_offset_min), cycles),
            answers: Vec::new(),
        },
        None => match setup_session(host.as_ref(), &config, now) {
            Ok(setup) => setup,
            Err(CoreError::SetupAborted) => {
                println!("Setup cancelled.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        },
    };

    let end = end_time_for_cycles(setup.session.start_time, setup.session.cycle_count, &config);
    println!(
        "Focus session: {} cycles from {} until {}",
        setup.session.cycle_count,
        format_time(setup.session.start_time),
        format_time(end),
    );
    tracing::info!(
        cycles = setup.session.cycle_count,
        start = %format_time(setup.session.start_time),
        "running focus session"
    );

    let controller = SessionController::new(config, host.clone());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(controller.run_session(setup.session, &setup.answers))?;
    tracing::info!("focus session finished");

    let log = host.log_path(&focuscycle_core::LogTarget::new("focus"));
    println!("\nSession log: {}", log.display());
    Ok(())
}

/// Parse a `--now` override: RFC 3339, or `HH:MM` taken as today in the
/// local timezone.
fn parse_now(raw: &str) -> Result<DateTime<Local>, Box<dyn std::error::Error>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Ok(t.with_timezone(&Local));
    }
    let time = NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| format!("invalid --now value '{raw}': expected HH:MM or RFC 3339"))?;
    let today = Local::now().date_naive();
    Local
        .from_local_datetime(&today.and_time(time))
        .single()
        .ok_or_else(|| format!("ambiguous local time '{raw}'").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parse_now_accepts_clock_time_today() {
        let t = parse_now("09:05").unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (9, 5, 0));
        assert_eq!(t.date_naive(), Local::now().date_naive());
    }

    #[test]
    fn parse_now_accepts_rfc3339() {
        let t = parse_now("2026-03-02T09:00:00+00:00").unwrap();
        assert_eq!(
            t,
            DateTime::parse_from_rfc3339("2026-03-02T09:00:00+00:00")
                .unwrap()
                .with_timezone(&Local)
        );
    }

    #[test]
    fn parse_now_rejects_garbage() {
        assert!(parse_now("soonish").is_err());
        assert!(parse_now("25:99").is_err());
    }
}
