//! Replay command - run a recorded scroll session through the tracker.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use scrolldepth::event::TrackerEvent;
use scrolldepth::replay::{load_script, replay_with_recording};
use scrolldepth::tracker::TrackerConfig;

use crate::error::CliError;

/// Arguments for the replay command.
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to the session script (JSON)
    pub script: PathBuf,

    /// Print raw data-layer records as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Override the throttle window in milliseconds
    #[arg(long)]
    pub throttle_ms: Option<u64>,

    /// Disable percentage-mark tracking
    #[arg(long)]
    pub no_percentage: bool,

    /// Disable user-timing events
    #[arg(long)]
    pub no_user_timing: bool,

    /// Disable pixel-depth events
    #[arg(long)]
    pub no_pixel_depth: bool,
}

/// Run the replay command.
pub fn run(args: ReplayArgs) -> Result<(), CliError> {
    let script = load_script(&args.script)?;
    tracing::debug!(steps = script.steps.len(), "loaded session script");

    let mut config = TrackerConfig::default();
    if let Some(ms) = args.throttle_ms {
        config = config.with_throttle(Duration::from_millis(ms));
    }
    if args.no_percentage {
        config = config.with_percentage(false);
    }
    if args.no_user_timing {
        config = config.with_user_timing(false);
    }
    if args.no_pixel_depth {
        config = config.with_pixel_depth(false);
    }

    let (events, summary) = replay_with_recording(&script, config);

    if args.json {
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
        return Ok(());
    }

    println!("ScrollDepth Replay v{}", scrolldepth::VERSION);
    println!("========================");
    println!();
    println!("Script:   {}", args.script.display());
    println!(
        "Page:     {}px document, {}px viewport, {} element(s)",
        script.page.document_height,
        script.page.viewport_height,
        script.page.elements.len()
    );
    println!("Steps:    {}", script.steps.len());
    println!();

    if events.is_empty() {
        println!("No events emitted.");
    } else {
        for event in &events {
            print_event(event);
        }
    }

    println!();
    println!("Session Summary");
    println!("───────────────");
    println!("  Thresholds fired: {}", summary.fired_count);
    println!("  Deepest pixel:    {}px", summary.last_pixel_depth);
    println!(
        "  Listener:         {}",
        if summary.detached { "detached" } else { "attached" }
    );

    Ok(())
}

fn print_event(event: &TrackerEvent) {
    match event {
        TrackerEvent::Distance { action, label, .. } => {
            println!("  [{:<11}] {}", action.as_str(), label);
        }
        TrackerEvent::Timing {
            action,
            label,
            elapsed_ms,
        } => {
            println!("  [{:<11}] {} after {}ms", action.as_str(), label, elapsed_ms);
        }
    }
}
