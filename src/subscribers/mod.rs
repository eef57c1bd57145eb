//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait and the plumbing that delivers
//! [`Event`](crate::Event)s from a [`Bus`](crate::Bus) to user code.
//!
//! ## Architecture
//! ```text
//! Controller ── publish(Event) ──► Bus ──► Observer (listener task)
//!                                              │
//!                                              ▼
//!                                        SubscriberSet
//!                                   ┌─────────┼─────────┐
//!                                   ▼         ▼         ▼
//!                               LogWriter  Metrics   Custom
//! ```
//!
//! ## Implementing custom subscribers
//! ```no_run
//! use actionvisor::{Subscribe, Event, EventKind};
//! use async_trait::async_trait;
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, event: &Event) {
//!         if event.kind == EventKind::ActionFailed {
//!             // increment failure counter
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "failure_counter" }
//! }
//! ```

mod observer;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod embedded;

pub use observer::Observer;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;

pub(crate) use set::panic_message;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
