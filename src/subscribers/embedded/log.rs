//! # LogWriter: structured event logging
//!
//! A subscriber that renders incoming [`Event`]s through `tracing`. Install any
//! `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see the output.
//!
//! ## Levels
//! - `debug`: starting, succeeded, superseded, deduplicated, discarded, reset
//! - `info`: cancel requests, group cancel-all
//! - `warn`: failures, timeouts, self-aborted invocations, subscriber overflow
//! - `error`: subscriber panics

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let action = e.action.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("");
        let invocation = e.invocation.unwrap_or(0);

        match e.kind {
            EventKind::ActionStarting => {
                tracing::debug!(seq = e.seq, action, invocation, "starting");
            }
            EventKind::ActionSucceeded => {
                tracing::debug!(seq = e.seq, action, invocation, "succeeded");
            }
            EventKind::ActionFailed => {
                tracing::warn!(seq = e.seq, action, invocation, reason, "failed");
            }
            EventKind::ActionCancelled => {
                tracing::warn!(seq = e.seq, action, invocation, "aborted by action");
            }
            EventKind::TimeoutHit => {
                tracing::warn!(seq = e.seq, action, invocation, timeout_ms = ?e.timeout_ms, "timeout");
            }
            EventKind::ActionSuperseded => {
                tracing::debug!(seq = e.seq, action, invocation, "superseded");
            }
            EventKind::ActionDeduplicated => {
                tracing::debug!(seq = e.seq, action, invocation, "deduplicated");
            }
            EventKind::ActionDiscarded => {
                tracing::debug!(seq = e.seq, action, invocation, "stale outcome discarded");
            }
            EventKind::CancelRequested => {
                tracing::info!(seq = e.seq, action, invocation, "cancelled");
            }
            EventKind::ActionReset => {
                tracing::debug!(seq = e.seq, action, "reset");
            }
            EventKind::GroupCancelAll => {
                tracing::info!(seq = e.seq, reason, "group cancel-all");
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(seq = e.seq, subscriber = action, reason, "subscriber overflow");
            }
            EventKind::SubscriberPanicked => {
                tracing::error!(seq = e.seq, subscriber = action, reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handles_every_kind_without_subscriber_installed() {
        let writer = LogWriter::new();
        for kind in [
            EventKind::ActionStarting,
            EventKind::ActionFailed,
            EventKind::TimeoutHit,
            EventKind::GroupCancelAll,
            EventKind::SubscriberPanicked,
        ] {
            writer.on_event(&Event::new(kind).with_action("render")).await;
        }
        assert_eq!(writer.name(), "log_writer");
    }
}
