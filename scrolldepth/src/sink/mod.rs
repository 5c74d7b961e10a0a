//! Event sink abstraction.
//!
//! The sink is the tracker's only output boundary. It is supplied explicitly
//! at construction time - the tracker never probes its environment for an
//! ambient analytics integration. Delivery is fire-and-forget: `emit` must
//! not block, and a sink that can no longer deliver drops events silently,
//! since analytics must never break the page it instruments.
//!
//! # Implementors
//!
//! - [`NullSink`] - drops every event; the fallback when no sink was
//!   configured
//! - [`RecordingSink`] - collects events in memory for tests and replay
//! - [`ChannelSink`] - forwards events into a tokio unbounded channel

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use crate::event::TrackerEvent;

/// Receives emitted tracking events.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the tracker may live on a
/// background task while sinks are shared with the host.
pub trait EventSink: Send + Sync {
    /// Accept one event record. Must not block.
    fn emit(&self, event: TrackerEvent);
}

/// Sink that drops every event.
///
/// Used when no sink was configured: events are computed and discarded
/// rather than failing, so the tracker keeps its bookkeeping consistent.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: TrackerEvent) {}
}

/// Sink that records every event in memory.
///
/// # Example
///
/// ```
/// use scrolldepth::event::{DepthAction, TrackerEvent};
/// use scrolldepth::sink::{EventSink, RecordingSink};
///
/// let sink = RecordingSink::new();
/// sink.emit(TrackerEvent::distance(DepthAction::Percentage, "25%", true));
///
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.events()[0].label(), "25%");
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TrackerEvent>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in emission order.
    pub fn events(&self) -> Vec<TrackerEvent> {
        self.events.lock().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drain all recorded events, leaving the sink empty.
    pub fn take(&self) -> Vec<TrackerEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: TrackerEvent) {
        self.events.lock().push(event);
    }
}

/// Sink that forwards events into a tokio channel.
///
/// If the receiver has gone away the event is dropped; an analytics sink
/// never reports failure to the page it instruments.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<TrackerEvent>,
}

impl ChannelSink {
    /// Wrap an unbounded sender.
    pub fn new(tx: mpsc::UnboundedSender<TrackerEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: TrackerEvent) {
        if self.tx.send(event).is_err() {
            debug!("event channel closed, dropping event");
        }
    }
}
