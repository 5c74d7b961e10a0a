//! Channel-fed tracker service.
//!
//! The tracker core is synchronous; this module is the asynchronous
//! rendition of "attach a scroll listener". A [`TrackerService`] is a
//! long-running tokio task that owns a [`ScrollDepthTracker`] and consumes
//! [`TrackerCommand`]s from an unbounded channel:
//!
//! ```text
//! host ──TrackerCommand──► TrackerService ──► ScrollDepthTracker ──► EventSink
//!                               │
//!                        sleep_until(throttle
//!                        trailing deadline)
//! ```
//!
//! Scroll commands update the shared page's scroll offset and run the
//! throttle-gated check; between commands the service sleeps until the
//! throttle's trailing deadline so absorbed bursts are always flushed.
//!
//! # Example
//!
//! ```ignore
//! let (service, commands) = TrackerService::new(tracker, page);
//! let shutdown = CancellationToken::new();
//! tokio::spawn(service.run(shutdown.clone()));
//!
//! commands.send(TrackerCommand::Scroll { top: 400 })?;
//! ```

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::page::SimulatedPage;
use crate::tracker::ScrollDepthTracker;

/// Commands accepted by the tracker service.
#[derive(Debug, Clone)]
pub enum TrackerCommand {
    /// A scroll notification: the viewport moved to the given offset.
    Scroll {
        /// New scroll offset (top edge of the viewport).
        top: u64,
    },
    /// Clear session state and rebind, as on single-page navigation.
    Reset,
    /// Append element identifiers to the tracked set.
    AddElements(Vec<String>),
    /// Remove element identifiers from the tracked and fired sets.
    RemoveElements(Vec<String>),
}

/// Long-running task that owns a tracker and serves commands.
pub struct TrackerService {
    tracker: ScrollDepthTracker,
    page: Arc<SimulatedPage>,
    command_rx: mpsc::UnboundedReceiver<TrackerCommand>,
}

impl TrackerService {
    /// Create a service around the given tracker and page.
    ///
    /// Returns the service and a sender that can be cloned for producers.
    /// The page must be the same one the tracker was built over; the
    /// service applies scroll offsets to it before each check.
    pub fn new(
        tracker: ScrollDepthTracker,
        page: Arc<SimulatedPage>,
    ) -> (Self, mpsc::UnboundedSender<TrackerCommand>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let service = Self {
            tracker,
            page,
            command_rx,
        };
        (service, command_tx)
    }

    /// Run until shutdown is signalled or all senders are dropped.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("scroll tracker service starting");

        loop {
            let deadline = self.tracker.next_deadline();

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("scroll tracker service shutting down");
                    break;
                }

                command = self.command_rx.recv() => {
                    match command {
                        Some(command) => self.handle_command(command),
                        None => {
                            debug!("command channel closed");
                            break;
                        }
                    }
                }

                _ = trailing_sleep(deadline) => {
                    self.tracker.poll(Instant::now());
                }
            }
        }
    }

    fn handle_command(&mut self, command: TrackerCommand) {
        match command {
            TrackerCommand::Scroll { top } => {
                self.page.set_scroll_top(top);
                self.tracker.on_scroll(Instant::now());
            }
            TrackerCommand::Reset => self.tracker.reset(Instant::now()),
            TrackerCommand::AddElements(ids) => self.tracker.add_elements(ids),
            TrackerCommand::RemoveElements(ids) => self.tracker.remove_elements(ids),
        }
    }
}

/// Sleep until the trailing deadline, or forever when none is owed.
async fn trailing_sleep(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending::<()>().await,
    }
}
