//! `meetq` CLI — find meeting slots in a day of calendar events.
//!
//! ## Usage
//!
//! ```sh
//! # Find slots for the request in a schedule document (stdin → stdout)
//! cat day.json | meetq query
//!
//! # Read from file, write JSON to file
//! meetq query -i day.json -o slots.json --format json
//!
//! # Try a different meeting length without editing the document
//! meetq query -i day.json --duration 90
//!
//! # Show the merged busy blocks of two people
//! meetq blocked -i day.json --attendee alice --attendee bob
//!
//! # Log how the result was reached
//! meetq -v query -i day.json
//! ```
//!
//! The schedule document format is described in `meeting_query::wire`.

use std::collections::BTreeSet;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use meeting_query::wire::{QueryReport, ScheduleInput, SlotOutput};
use meeting_query::{blocked_ranges, Resolution};

#[derive(Parser)]
#[command(
    name = "meetq",
    version,
    about = "Find meeting slots in a day of calendar events"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log query decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum Format {
    /// One `HH:MM-HH:MM (N min)` line per slot
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Find every slot where the requested meeting fits
    Query {
        /// Schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
        /// Meeting length in minutes, replacing the document's value
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Show the merged busy blocks of a group of attendees
    Blocked {
        /// Schedule document (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Attendee to include (repeatable; defaults to everyone in the request)
        #[arg(long = "attendee")]
        attendees: Vec<String>,
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Query {
            input,
            output,
            format,
            duration,
        } => {
            let mut schedule = read_schedule(input.as_deref())?;
            if let Some(minutes) = duration {
                debug!("duration overridden: {} -> {}", schedule.request.duration, minutes);
                schedule.request.duration = minutes;
            }

            let report = schedule.run().context("Invalid schedule document")?;
            let rendered = match format {
                Format::Text => render_report(&report),
                Format::Json => serde_json::to_string_pretty(&report)? + "\n",
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Blocked {
            input,
            attendees,
            format,
        } => {
            let schedule = read_schedule(input.as_deref())?;
            let (events, request) = schedule.to_parts().context("Invalid schedule document")?;

            let people: BTreeSet<String> = if attendees.is_empty() {
                request.all_attendees()
            } else {
                attendees.into_iter().collect()
            };
            let blocked = blocked_ranges(&events, &people, request.duration());

            let rendered = match format {
                Format::Text => blocked.iter().map(|r| format!("{}\n", r)).collect(),
                Format::Json => {
                    let dtos: Vec<SlotOutput> = blocked.iter().map(SlotOutput::from).collect();
                    serde_json::to_string_pretty(&dtos)? + "\n"
                }
            };
            write_output(None, &rendered)?;
        }
    }

    Ok(())
}

fn render_report(report: &QueryReport) -> String {
    let mut out = String::new();
    if report.slots.is_empty() {
        out.push_str("No available slots\n");
    }
    for slot in &report.slots {
        out.push_str(&format!(
            "{}-{} ({} min)\n",
            slot.start, slot.end, slot.duration_minutes
        ));
    }
    out.push_str(&format!("resolution: {}\n", describe(report.resolution)));
    out
}

fn describe(resolution: Resolution) -> String {
    match resolution {
        Resolution::DurationTooLong => "duration longer than a day".to_string(),
        Resolution::AllAttendees => "all attendees".to_string(),
        Resolution::RequiredOnly => "required attendees only".to_string(),
        Resolution::PartialOptional { optional_attendees } => {
            format!("required attendees + {} optional", optional_attendees)
        }
    }
}

fn read_schedule(path: Option<&str>) -> Result<ScheduleInput> {
    let json = read_input(path)?;
    ScheduleInput::from_json(&json).context("Failed to parse schedule document")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
