//! # Lifecycle events emitted by controllers and groups.
//!
//! The [`EventKind`] enum classifies events across three categories:
//! - **Invocation events**: starting, succeeded, failed, cancelled, timeout
//! - **Control events**: supersession, deduplication, discard, cancel, reset
//! - **Subscriber events**: overflow and panic inside subscriber workers
//!
//! The [`Event`] struct carries metadata such as timestamps, action name,
//! invocation id, reasons, and timeouts.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use actionvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ActionFailed)
//!     .with_action("render")
//!     .with_reason("boom")
//!     .with_invocation(3)
//!     .with_timeout(Duration::from_secs(5));
//!
//! assert_eq!(ev.kind, EventKind::ActionFailed);
//! assert_eq!(ev.action.as_deref(), Some("render"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! assert_eq!(ev.timeout_ms, Some(5_000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `action`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `action`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Invocation events ===
    /// A new invocation started and became current.
    ///
    /// Sets:
    /// - `action`: action name
    /// - `invocation`: invocation id (1-based, per controller)
    ActionStarting,

    /// The current invocation succeeded.
    ///
    /// Sets:
    /// - `action`, `invocation`
    ActionSucceeded,

    /// The current invocation failed (natural failure or timeout).
    ///
    /// Sets:
    /// - `action`, `invocation`
    /// - `reason`: error message
    ActionFailed,

    /// The current invocation aborted itself after observing cancellation.
    ///
    /// Sets:
    /// - `action`, `invocation`
    ActionCancelled,

    /// The invocation exceeded its configured timeout.
    ///
    /// Always followed by `ActionFailed` if the invocation is still current.
    ///
    /// Sets:
    /// - `action`, `invocation`
    /// - `timeout_ms`: configured timeout (ms)
    TimeoutHit,

    // === Control events ===
    /// A running invocation was superseded by a newer `execute()`.
    ///
    /// Sets:
    /// - `action`
    /// - `invocation`: id of the superseded invocation
    ActionSuperseded,

    /// `execute()` attached to the in-flight invocation instead of starting one.
    ///
    /// Sets:
    /// - `action`
    /// - `invocation`: id of the in-flight invocation
    ActionDeduplicated,

    /// A settled invocation was no longer current; its outcome was dropped.
    ///
    /// Sets:
    /// - `action`, `invocation`
    ActionDiscarded,

    /// `cancel()` tore down an in-flight invocation.
    ///
    /// Sets:
    /// - `action`
    /// - `invocation`: id of the cancelled invocation
    CancelRequested,

    /// `reset()` cleared the controller state.
    ///
    /// Sets:
    /// - `action`
    ActionReset,

    /// `ActionGroup::cancel_all()` was called.
    ///
    /// Sets:
    /// - `reason`: number of members that had work in flight
    GroupCancelAll,
}

/// Lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the action (or subscriber), if applicable.
    pub action: Option<Arc<str>>,
    /// Invocation id within the controller.
    pub invocation: Option<u64>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Timeout in milliseconds (compact).
    pub timeout_ms: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            action: None,
            invocation: None,
            reason: None,
            timeout_ms: None,
        }
    }

    /// Attaches an action name.
    #[inline]
    pub fn with_action(mut self, action: impl Into<Arc<str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Attaches an invocation id.
    #[inline]
    pub fn with_invocation(mut self, id: u64) -> Self {
        self.invocation = Some(id);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a timeout duration (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_action(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_action(subscriber)
            .with_reason(info)
    }
}
