//! The scroll-depth tracker core.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::event::{DepthAction, TrackerEvent};
use crate::page::PageMetrics;
use crate::sink::{EventSink, NullSink};

use super::config::TrackerConfig;
use super::marks::{bucketed, percentage_marks};
use super::throttle::Throttle;

/// Builder for [`ScrollDepthTracker`].
///
/// The sink is injected here, never resolved from ambient state. Omitting
/// it falls back to [`NullSink`] with a warning: events are computed and
/// dropped rather than failing.
pub struct TrackerBuilder {
    config: TrackerConfig,
    page: Arc<dyn PageMetrics>,
    sink: Option<Arc<dyn EventSink>>,
}

impl TrackerBuilder {
    /// Start building a tracker for the given page.
    pub fn new(page: Arc<dyn PageMetrics>) -> Self {
        Self {
            config: TrackerConfig::default(),
            page,
            sink: None,
        }
    }

    /// Use the given configuration.
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the given event sink.
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the tracker, capturing `now` as the session start.
    ///
    /// Reads the current document height: below `min_height` the tracker is
    /// permanently inert and every subsequent operation is a no-op.
    pub fn build(self, now: Instant) -> ScrollDepthTracker {
        let sink = self.sink.unwrap_or_else(|| {
            warn!("no event sink configured, events will be dropped");
            Arc::new(NullSink)
        });

        let doc_height = self.page.document_height();
        let enabled = doc_height >= self.config.min_height;
        if !enabled {
            debug!(
                doc_height,
                min_height = self.config.min_height,
                "document below minimum height, tracker inert"
            );
        }

        let throttle = Throttle::new(self.config.throttle);
        ScrollDepthTracker {
            config: self.config,
            page: self.page,
            sink,
            throttle,
            fired: HashSet::new(),
            last_pixel_depth: 0,
            bound: enabled,
            enabled,
            session_start: now,
        }
    }
}

/// Tracks first crossings of scroll-depth thresholds and emits one event
/// per crossing.
///
/// All methods take an explicit `now` timestamp; the tracker holds no clock
/// of its own. State is owned exclusively by the instance and mutated only
/// from the caller's thread of control, so no locking is needed.
///
/// # Lifecycle
///
/// The tracker starts "bound" (listening). Once every configured threshold
/// has fired, it unbinds itself and further scrolls are ignored until
/// [`reset`](Self::reset) or [`add_elements`](Self::add_elements) rebinds
/// it. A document shorter than `min_height` at build time leaves the
/// tracker permanently inert.
pub struct ScrollDepthTracker {
    config: TrackerConfig,
    page: Arc<dyn PageMetrics>,
    sink: Arc<dyn EventSink>,
    throttle: Throttle,

    /// Threshold identifiers already reported this session.
    fired: HashSet<String>,

    /// Deepest scroll distance for which a pixel-depth event was emitted.
    last_pixel_depth: u64,

    /// Whether the scroll listener is attached.
    bound: bool,

    /// False when the document was below `min_height` at build time.
    enabled: bool,

    session_start: Instant,
}

impl ScrollDepthTracker {
    /// Handle a scroll notification arriving at `now`.
    ///
    /// Rate-limited: at most one scroll check runs per throttle window, and
    /// absorbed notifications are served later by [`poll`](Self::poll).
    pub fn on_scroll(&mut self, now: Instant) {
        if !self.enabled || !self.bound {
            return;
        }
        if self.throttle.allow(now) {
            self.check(now);
        }
    }

    /// Run the owed trailing scroll check, if one is due at `now`.
    ///
    /// Hosts call this after the throttle window elapses (see
    /// [`next_deadline`](Self::next_deadline)) so a scroll burst's final
    /// resting position is always evaluated.
    pub fn poll(&mut self, now: Instant) {
        if !self.enabled || !self.bound {
            return;
        }
        if self.throttle.trailing_ready(now) {
            self.check(now);
        }
    }

    /// When the owed trailing check becomes due, if one is owed.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.enabled && self.bound {
            self.throttle.deadline()
        } else {
            None
        }
    }

    /// Clear all session state and rebind the listener.
    ///
    /// Used when the host page content is replaced without a full reload.
    /// The session clock restarts at `now`. No-op on an inert tracker.
    pub fn reset(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        debug!("tracker reset");
        self.fired.clear();
        self.last_pixel_depth = 0;
        self.session_start = now;
        self.throttle.reset();
        self.bound = true;
    }

    /// Append element identifiers to the tracked set.
    ///
    /// Identifiers already tracked are skipped. Rebinds the listener if all
    /// previous thresholds had fired. Empty input is a no-op.
    pub fn add_elements<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.enabled {
            return;
        }
        let mut added = 0usize;
        for id in ids {
            let id = id.into();
            if self.config.elements.contains(&id) {
                continue;
            }
            self.config.elements.push(id);
            added += 1;
        }
        if added > 0 && !self.bound {
            debug!(added, "new tracked elements, rebinding scroll listener");
            self.throttle.reset();
            self.bound = true;
        }
    }

    /// Remove element identifiers from both the tracked set and the fired
    /// set, allowing them to fire again if re-added later.
    ///
    /// Unknown identifiers are ignored.
    pub fn remove_elements<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.enabled {
            return;
        }
        for id in ids {
            let id = id.as_ref();
            self.config.elements.retain(|tracked| tracked != id);
            self.fired.remove(id);
        }
    }

    /// Whether the scroll listener is currently attached.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Number of thresholds that have fired this session.
    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    /// Deepest scroll distance for which a pixel-depth event was emitted.
    pub fn last_pixel_depth(&self) -> u64 {
        self.last_pixel_depth
    }

    /// The active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// One scroll-check execution.
    fn check(&mut self, now: Instant) {
        // All thresholds exhausted: detach until reset or new elements.
        // A pixel-depth-only configuration has no thresholds to exhaust
        // and keeps listening indefinitely.
        let threshold_count = self.config.threshold_count();
        if threshold_count > 0 && self.fired.len() >= threshold_count {
            debug!("all thresholds fired, unbinding scroll listener");
            self.bound = false;
            return;
        }

        // Marks are recomputed from the current height on every check;
        // dynamic content may have resized the document.
        let doc_height = self.page.document_height();
        let distance = self.page.scroll_top() + self.page.viewport_height();
        let elapsed_ms = now.saturating_duration_since(self.session_start).as_millis() as u64;

        for id in self.config.elements.clone() {
            if self.fired.contains(&id) {
                continue;
            }
            let Some(top) = self.page.element_top(&id) else {
                continue;
            };
            if distance >= top {
                self.emit_threshold(DepthAction::Elements, &id, elapsed_ms);
                self.fired.insert(id);
            }
        }

        if self.config.percentage {
            for (mark, threshold) in percentage_marks(doc_height) {
                if self.fired.contains(mark.label()) {
                    continue;
                }
                if distance >= threshold {
                    self.emit_threshold(DepthAction::Percentage, mark.label(), elapsed_ms);
                    self.fired.insert(mark.label().to_string());
                }
            }
        }

        if self.config.pixel_depth && distance > self.last_pixel_depth {
            self.last_pixel_depth = distance;
            self.sink.emit(TrackerEvent::distance(
                DepthAction::PixelDepth,
                bucketed(distance).to_string(),
                self.config.non_interaction,
            ));
        }
    }

    fn emit_threshold(&self, action: DepthAction, label: &str, elapsed_ms: u64) {
        debug!(%action, label, "threshold crossed");
        self.sink
            .emit(TrackerEvent::distance(action, label, self.config.non_interaction));
        if self.config.user_timing {
            self.sink
                .emit(TrackerEvent::timing(action, label, elapsed_ms));
        }
    }
}
