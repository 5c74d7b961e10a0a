//! Scroll-depth tracking core.
//!
//! [`ScrollDepthTracker`] owns all session state: the set of thresholds that
//! have fired, the deepest pixel distance reported, the throttle, and the
//! session clock. It queries geometry through
//! [`PageMetrics`](crate::page::PageMetrics) and emits through
//! [`EventSink`](crate::sink::EventSink); both are injected at build time.
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
//! let page = Arc::new(SimulatedPage::new(3000, 800));
//! let sink = Arc::new(RecordingSink::new());
//!
//! let start = Instant::now();
//! let mut tracker = TrackerBuilder::new(page.clone())
//!     .config(TrackerConfig::default().with_elements(["#footer"]))
//!     .sink(sink.clone())
//!     .build(start);
//!
//! page.place_element("#footer", 2800);
//! page.set_scroll_top(2200);
//! tracker.on_scroll(start);
//!
//! assert!(sink.events().iter().any(|e| e.label() == "#footer"));
//! ```

mod config;
mod depth;
mod marks;
mod throttle;

pub use config::{TrackerConfig, DEFAULT_THROTTLE_MS};
pub use depth::{ScrollDepthTracker, TrackerBuilder};
pub use marks::{bucketed, percentage_marks, PercentMark, FULL_MARK_CUSHION, PIXEL_DEPTH_BUCKET};
pub use throttle::Throttle;
