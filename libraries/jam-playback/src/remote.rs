//! Fire-and-forget reporting to the backend
//!
//! The engine and the interaction store never await the network. They push
//! a [`RemoteRequest`] onto a [`RemoteQueue`]; a [`RemoteDispatcher`] task
//! drains the queue and calls the [`RemoteTrackService`]. Failures are logged
//! and dropped: no retry, no rollback of the optimistic local change.

use jam_core::{RemoteTrackService, TrackId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Request queued for the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    /// A track became current: count one play
    ReportPlay {
        /// Track that started
        track_id: TrackId,
    },

    /// The user toggled their like
    ToggleLike {
        /// Track that was (un)liked
        track_id: TrackId,
        /// Local state after the toggle, for logging only
        liked: bool,
    },
}

impl RemoteRequest {
    /// Track the request is about
    pub fn track_id(&self) -> &TrackId {
        match self {
            RemoteRequest::ReportPlay { track_id } | RemoteRequest::ToggleLike { track_id, .. } => {
                track_id
            }
        }
    }
}

/// Sending half of the reporting queue
#[derive(Debug, Clone)]
pub struct RemoteQueue {
    tx: mpsc::UnboundedSender<RemoteRequest>,
}

impl RemoteQueue {
    /// Create a queue and the receiver the dispatcher reads from
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<RemoteRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue a request without waiting.
    ///
    /// If the dispatcher is gone the request is dropped with a warning.
    pub fn submit(&self, request: RemoteRequest) {
        if let Err(err) = self.tx.send(request) {
            warn!(
                track_id = %err.0.track_id(),
                "Remote dispatcher closed, dropping request"
            );
        }
    }
}

/// Outcome counters of a dispatcher run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Requests the backend accepted
    pub succeeded: usize,

    /// Requests that failed and were dropped
    pub failed: usize,
}

/// Drains the reporting queue into a [`RemoteTrackService`]
pub struct RemoteDispatcher {
    rx: mpsc::UnboundedReceiver<RemoteRequest>,
    service: Arc<dyn RemoteTrackService>,
    stats: DispatchStats,
}

impl RemoteDispatcher {
    /// Create a dispatcher reading from `rx`
    pub fn new(
        rx: mpsc::UnboundedReceiver<RemoteRequest>,
        service: Arc<dyn RemoteTrackService>,
    ) -> Self {
        Self {
            rx,
            service,
            stats: DispatchStats::default(),
        }
    }

    /// Process requests until every [`RemoteQueue`] is dropped.
    pub async fn run(mut self) -> DispatchStats {
        while let Some(request) = self.rx.recv().await {
            self.dispatch(request).await;
        }
        debug!(
            succeeded = self.stats.succeeded,
            failed = self.stats.failed,
            "Remote dispatcher finished"
        );
        self.stats
    }

    /// Run on the current tokio runtime
    pub fn spawn(self) -> JoinHandle<DispatchStats> {
        tokio::spawn(self.run())
    }

    /// Process only what is queued right now, without waiting for more.
    ///
    /// Returns the number of requests processed.
    pub async fn dispatch_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(request) = self.rx.try_recv() {
            self.dispatch(request).await;
            processed += 1;
        }
        processed
    }

    /// Counters so far
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    async fn dispatch(&mut self, request: RemoteRequest) {
        let result = match &request {
            RemoteRequest::ReportPlay { track_id } => self.service.report_play(track_id).await,
            RemoteRequest::ToggleLike { track_id, .. } => self.service.toggle_like(track_id).await,
        };

        match result {
            Ok(()) => {
                self.stats.succeeded += 1;
                debug!(request = ?request, "Remote request delivered");
            }
            Err(err) => {
                self.stats.failed += 1;
                // Local counters keep their optimistic value
                warn!(
                    track_id = %request.track_id(),
                    error = %err,
                    request = ?request,
                    "Remote request failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_after_dispatcher_dropped_does_not_panic() {
        let (queue, rx) = RemoteQueue::channel();
        drop(rx);
        queue.submit(RemoteRequest::ReportPlay {
            track_id: TrackId::new("t-1"),
        });
    }

    #[test]
    fn requests_expose_track_id() {
        let request = RemoteRequest::ToggleLike {
            track_id: TrackId::new("t-2"),
            liked: true,
        };
        assert_eq!(request.track_id().as_str(), "t-2");
    }
}
