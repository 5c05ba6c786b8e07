//! `slots` CLI — resolve bookable slots from schedule and busy-interval files.
//!
//! ## Usage
//!
//! ```sh
//! # Every 15 minutes on a Monday, 30-minute event
//! slots resolve --schedule schedule.json --busy busy.json --duration 30 \
//!   --from 2026-03-16T09:00:00Z --to 2026-03-16T16:30:00Z
//!
//! # Same, as a JSON array
//! slots resolve --schedule schedule.json --duration 30 \
//!   --from 2026-03-16T09:00:00Z --to 2026-03-16T16:30:00Z --json
//!
//! # Check a single start time (exit code 1 when unavailable)
//! slots check --schedule schedule.json --busy busy.json --duration 30 \
//!   --at 2026-03-16T09:45:00Z
//! ```
//!
//! A schedule file containing `null` means the owner has no schedule. Logs go
//! to stderr and honor `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use slot_engine::candidates::CandidateSteps;
use slot_engine::interval::busy_from_json;
use slot_engine::{resolve_valid_slots, BusyInterval, EventSpec, Schedule};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Resolve bookable meeting slots from weekly availability and busy intervals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every valid start time between --from and --to
    Resolve {
        #[command(flatten)]
        inputs: Inputs,
        /// First candidate start time (RFC 3339)
        #[arg(long)]
        from: DateTime<Utc>,
        /// Last candidate start time, inclusive (RFC 3339)
        #[arg(long)]
        to: DateTime<Utc>,
        /// Minutes between candidates
        #[arg(long, default_value_t = 15)]
        step: u32,
        /// Print a JSON array instead of one instant per line
        #[arg(long)]
        json: bool,
    },
    /// Report whether a single start time is bookable
    Check {
        #[command(flatten)]
        inputs: Inputs,
        /// Proposed start time (RFC 3339)
        #[arg(long)]
        at: DateTime<Utc>,
    },
}

#[derive(clap::Args)]
struct Inputs {
    /// Schedule JSON file
    #[arg(short, long)]
    schedule: String,
    /// Busy intervals JSON file (no busy time if omitted)
    #[arg(short, long)]
    busy: Option<String>,
    /// Event duration in minutes
    #[arg(short, long)]
    duration: u32,
}

impl Inputs {
    fn load(&self) -> Result<(Option<Schedule>, Vec<BusyInterval>, EventSpec)> {
        let schedule = Schedule::from_json(&read_file(&self.schedule)?)
            .with_context(|| format!("Invalid schedule file: {}", self.schedule))?;
        let busy = match self.busy.as_deref() {
            Some(path) => busy_from_json(&read_file(path)?)
                .with_context(|| format!("Invalid busy interval file: {}", path))?,
            None => Vec::new(),
        };
        let owner = schedule
            .as_ref()
            .map(|s| s.owner_id.clone())
            .unwrap_or_default();
        debug!(owner = %owner, busy = busy.len(), duration = self.duration, "loaded inputs");
        Ok((schedule, busy, EventSpec::new(owner, self.duration)))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve {
            inputs,
            from,
            to,
            step,
            json,
        } => {
            let (schedule, busy, event) = inputs.load()?;
            let candidates: Vec<DateTime<Utc>> = CandidateSteps::new(from, to, step)
                .context("Invalid candidate range")?
                .collect();
            let valid = resolve_valid_slots(&candidates, &event, schedule.as_ref(), &busy)
                .context("Failed to resolve slots")?;

            let formatted: Vec<String> = valid.iter().map(|t| format_instant(*t)).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&formatted)?);
            } else {
                for line in formatted {
                    println!("{}", line);
                }
            }
        }
        Commands::Check { inputs, at } => {
            let (schedule, busy, event) = inputs.load()?;
            let valid = resolve_valid_slots(&[at], &event, schedule.as_ref(), &busy)
                .context("Failed to resolve slots")?;
            if valid.is_empty() {
                println!("unavailable");
                process::exit(1);
            }
            println!("available");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn format_instant(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
}
