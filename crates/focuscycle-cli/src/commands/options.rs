use chrono::Local;
use clap::Args;
use focuscycle_core::{cycle_options, start_time_options, SessionConfig};

#[derive(Args)]
pub struct OptionsArgs {
    /// Index into the start-time list to project cycle end times from
    #[arg(long, default_value = "4")]
    pub start: usize,
}

pub fn run(args: OptionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = SessionConfig::load_or_default();
    let starts = start_time_options(Local::now());

    println!("Start times:");
    for (i, option) in starts.iter().enumerate() {
        println!("  [{i}] {}", option.label);
    }

    let start = starts
        .get(args.start)
        .ok_or_else(|| format!("start index out of range (0..{})", starts.len() - 1))?;
    println!("\nCycle counts from {}:", start.label);
    for (i, option) in cycle_options(start.value, &config).iter().enumerate() {
        println!("  [{i}] {}", option.label);
    }
    Ok(())
}
