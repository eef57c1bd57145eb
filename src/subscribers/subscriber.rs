//! # Event subscriber trait.
//!
//! [`Subscribe`] is how user code reacts to action lifecycle events: invocations
//! starting, settling, being superseded, deduplicated, discarded or timed out,
//! and group-wide cancel-all.
//!
//! ```text
//! ActionController ──► Bus ──► Observer ──► SubscriberSet ──► lane ──► on_event()
//! ```
//!
//! ## Rules
//! - Every subscriber owns one bounded lane and one worker; a slow subscriber
//!   only delays its own lane.
//! - A full lane drops the event for that subscriber and publishes
//!   `EventKind::SubscriberOverflow`.
//! - A panic in `on_event` is caught and published as `EventKind::SubscriberPanicked`.
//! - Per subscriber, events arrive in publish order.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use async_trait::async_trait;
//! use actionvisor::{Event, EventKind, Subscribe};
//!
//! /// Counts invocations that were started but lost to a newer one.
//! #[derive(Default)]
//! struct SupersededCounter(AtomicU64);
//!
//! #[async_trait]
//! impl Subscribe for SupersededCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::ActionSuperseded | EventKind::ActionDiscarded) {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "superseded_counter" }
//!     fn queue_capacity(&self) -> usize { 256 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Receives action lifecycle events on a dedicated worker.
///
/// Implementations should use async I/O only and handle their own errors.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event. Never called from the publishing controller.
    async fn on_event(&self, event: &Event);

    /// Name reported in overflow and panic events.
    ///
    /// Defaults to `type_name::<Self>()`; a short name reads better in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Lane capacity for this subscriber, clamped to at least 1. Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
