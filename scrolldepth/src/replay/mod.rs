//! Recorded-session replay.
//!
//! A [`ScrollScript`] describes a page (document/viewport geometry and
//! element offsets) plus a timed sequence of scroll positions. Replaying a
//! script drives a tracker through the sequence in simulated time - every
//! step and trailing throttle check runs at a synthetic `Instant` derived
//! from the step's `at_ms` - so the emitted event sequence is fully
//! deterministic regardless of wall-clock behaviour.
//!
//! # Script format
//!
//! ```json
//! {
//!   "page": {
//!     "document_height": 2000,
//!     "viewport_height": 600,
//!     "elements": { "#footer": 1800 }
//!   },
//!   "steps": [
//!     { "at_ms": 0, "scroll_top": 0 },
//!     { "at_ms": 800, "scroll_top": 400 },
//!     { "at_ms": 1600, "scroll_top": 1400 }
//!   ],
//!   "options": { "user_timing": false }
//! }
//! ```
//!
//! When `options.elements` is omitted, every element placed in the page is
//! tracked, in identifier order.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;

use crate::event::TrackerEvent;
use crate::page::SimulatedPage;
use crate::sink::{EventSink, RecordingSink};
use crate::tracker::{ScrollDepthTracker, TrackerBuilder, TrackerConfig};

/// Errors from loading or validating a scroll script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Could not read the script file.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not valid JSON of the expected shape.
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    /// The script parsed but describes an unusable session.
    #[error("invalid script: {0}")]
    Invalid(String),
}

/// Page geometry for a scripted session.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPage {
    /// Total document height in layout pixels.
    pub document_height: u64,

    /// Viewport height in layout pixels.
    pub viewport_height: u64,

    /// Element identifiers mapped to their document-top offsets.
    #[serde(default)]
    pub elements: BTreeMap<String, u64>,
}

/// One timed scroll position.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScriptStep {
    /// Milliseconds from session start.
    pub at_ms: u64,

    /// Scroll offset at that time.
    pub scroll_top: u64,
}

/// Optional tracker-option overrides carried by a script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    /// Override `min_height`.
    pub min_height: Option<u64>,
    /// Override the tracked-element list (default: all page elements).
    pub elements: Option<Vec<String>>,
    /// Override percentage-mark tracking.
    pub percentage: Option<bool>,
    /// Override user-timing events.
    pub user_timing: Option<bool>,
    /// Override pixel-depth events.
    pub pixel_depth: Option<bool>,
    /// Override the non-interaction flag.
    pub non_interaction: Option<bool>,
    /// Override the throttle window, in milliseconds.
    pub throttle_ms: Option<u64>,
}

/// A recorded scroll session.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrollScript {
    /// Page geometry.
    pub page: ScriptPage,

    /// Timed scroll positions, in ascending time order.
    pub steps: Vec<ScriptStep>,

    /// Tracker-option overrides.
    #[serde(default)]
    pub options: ScriptOptions,
}

impl ScrollScript {
    /// Parse and validate a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        let script: ScrollScript = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    /// Resolve the tracker configuration for this script on top of `base`.
    pub fn tracker_config(&self, base: TrackerConfig) -> TrackerConfig {
        let options = &self.options;
        let mut config = base;
        if let Some(min_height) = options.min_height {
            config.min_height = min_height;
        }
        if let Some(percentage) = options.percentage {
            config.percentage = percentage;
        }
        if let Some(user_timing) = options.user_timing {
            config.user_timing = user_timing;
        }
        if let Some(pixel_depth) = options.pixel_depth {
            config.pixel_depth = pixel_depth;
        }
        if let Some(non_interaction) = options.non_interaction {
            config.non_interaction = non_interaction;
        }
        if let Some(throttle_ms) = options.throttle_ms {
            config.throttle = Duration::from_millis(throttle_ms);
        }
        config.elements = match &options.elements {
            Some(elements) => elements.clone(),
            None => self.page.elements.keys().cloned().collect(),
        };
        config
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.page.viewport_height == 0 {
            return Err(ScriptError::Invalid("viewport_height must be non-zero".into()));
        }
        for pair in self.steps.windows(2) {
            if pair[1].at_ms < pair[0].at_ms {
                return Err(ScriptError::Invalid(format!(
                    "steps out of time order: {}ms after {}ms",
                    pair[1].at_ms, pair[0].at_ms
                )));
            }
        }
        Ok(())
    }
}

/// Load and validate a script from a file.
pub fn load_script(path: impl AsRef<Path>) -> Result<ScrollScript, ScriptError> {
    let text = std::fs::read_to_string(path)?;
    ScrollScript::from_json(&text)
}

/// Outcome of a replay.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    /// Steps applied from the script.
    pub steps_applied: usize,

    /// Thresholds fired by the end of the replay.
    pub fired_count: usize,

    /// Deepest pixel distance for which an event was emitted.
    pub last_pixel_depth: u64,

    /// Whether the listener detached (all thresholds exhausted).
    pub detached: bool,
}

/// Replay a script against a fresh tracker in simulated time.
///
/// Builds a [`SimulatedPage`] from the script's geometry, applies every
/// step at its synthetic timestamp (running any owed trailing check first,
/// at the moment it was due), and finishes with a final trailing flush one
/// window after the last step.
pub fn replay(
    script: &ScrollScript,
    base_config: TrackerConfig,
    sink: Arc<dyn EventSink>,
) -> ReplaySummary {
    let page = Arc::new(SimulatedPage::new(
        script.page.document_height,
        script.page.viewport_height,
    ));
    for (id, top) in &script.page.elements {
        page.place_element(id.clone(), *top);
    }

    let config = script.tracker_config(base_config);
    let throttle = config.throttle;

    let start = Instant::now();
    let mut tracker = TrackerBuilder::new(page.clone())
        .config(config)
        .sink(sink)
        .build(start);

    let mut last = start;
    for step in &script.steps {
        let now = start + Duration::from_millis(step.at_ms);

        // Serve any trailing check that came due before this step, at the
        // moment it was due.
        if let Some(deadline) = tracker.next_deadline() {
            if deadline <= now {
                tracker.poll(deadline);
            }
        }

        page.set_scroll_top(step.scroll_top);
        tracker.on_scroll(now);
        last = now;
    }

    // Final trailing flush so the resting position is always evaluated.
    tracker.poll(last + throttle);

    summarize(&tracker, script.steps.len())
}

/// Replay a script and return the recorded events alongside the summary.
pub fn replay_with_recording(
    script: &ScrollScript,
    base_config: TrackerConfig,
) -> (Vec<TrackerEvent>, ReplaySummary) {
    let sink = Arc::new(RecordingSink::new());
    let summary = replay(script, base_config, sink.clone());
    (sink.take(), summary)
}

fn summarize(tracker: &ScrollDepthTracker, steps_applied: usize) -> ReplaySummary {
    ReplaySummary {
        steps_applied,
        fired_count: tracker.fired_count(),
        last_pixel_depth: tracker.last_pixel_depth(),
        detached: !tracker.is_bound(),
    }
}
