#![forbid(unsafe_code)]

//! CLI inspector for the stored visitor record
//!
//! Operates on the default file-backed store, mirroring what the website's
//! intro sequencer sees. Useful for checking what a visitor would get and
//! for clearing state during development.

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::Level as TraceLevel;
use tracing_subscriber::FmtSubscriber;

use visitor_state::{FileStore, VisitorTracker};

#[derive(Parser)]
#[command(name = "visitor-state", about = "Inspect and exercise the stored visitor record")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the visitor statistics projection as JSON
    Stats,
    /// Record a visit and print the resulting record
    Record,
    /// Set the skip-animation preference
    Skip {
        /// true to always get the minimal intro, false to clear the opt-out
        value: bool,
    },
    /// Remove the stored visitor record
    Reset,
    /// Print the animation duration and phase plan for the current record
    Duration,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut tracker = VisitorTracker::new(FileStore::default_location());

    match cli.command {
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&tracker.stats())?);
        }
        Command::Record => {
            let state = tracker.record_visit();
            println!("{}", state.encode());
        }
        Command::Skip { value } => {
            if !tracker.set_skip_preference(value) {
                return Err(anyhow::anyhow!("failed to persist skip preference").into());
            }
        }
        Command::Reset => {
            if !tracker.reset() {
                return Err(anyhow::anyhow!("failed to remove visitor record").into());
            }
        }
        Command::Duration => {
            let duration = tracker.animation_duration();
            let report = json!({
                "duration": duration,
                "phases": duration.phase_plan(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
