//! ScrollDepth - scroll-depth analytics tracking
//!
//! This library observes the vertical scroll position of a document, detects
//! the first crossing of configured thresholds (percentage-of-height marks
//! and individual element offsets), and emits exactly one tracking event per
//! crossing through a pluggable event sink.
//!
//! # Architecture
//!
//! ```text
//! scroll notifications ──► Throttle ──► ScrollDepthTracker ──► EventSink
//!                                            │
//!                                       PageMetrics
//!                                  (document / viewport /
//!                                    element geometry)
//! ```
//!
//! The tracker core is synchronous and single-owner: every method takes an
//! explicit [`std::time::Instant`], which keeps throttling and user-timing
//! behaviour fully deterministic under test. The [`service`] module wraps a
//! tracker in a channel-fed tokio task for hosts that deliver scroll
//! notifications asynchronously, and [`replay`] drives a tracker from a
//! recorded session script in simulated time.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Instant;
//!
//! use scrolldepth::page::SimulatedPage;
//! use scrolldepth::sink::RecordingSink;
//! use scrolldepth::tracker::{TrackerBuilder, TrackerConfig};
//!
//! let page = Arc::new(SimulatedPage::new(2000, 600));
//! let sink = Arc::new(RecordingSink::new());
//!
//! let start = Instant::now();
//! let mut tracker = TrackerBuilder::new(page.clone())
//!     .config(TrackerConfig::default())
//!     .sink(sink.clone())
//!     .build(start);
//!
//! // Scroll halfway down the document.
//! page.set_scroll_top(500);
//! tracker.on_scroll(start);
//!
//! // 25% and 50% marks have been crossed (500 + 600 >= 1000).
//! assert_eq!(tracker.fired_count(), 2);
//! ```

pub mod event;
pub mod page;
pub mod replay;
pub mod service;
pub mod sink;
pub mod tracker;

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
