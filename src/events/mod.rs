//! Lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by controllers, groups and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `ActionController` (execute/settle/cancel/reset), `ActionGroup`
//!   (`cancel_all`), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: [`Observer`](crate::Observer) (fans out to a `SubscriberSet`), or any
//!   receiver obtained from [`Bus::subscribe`].

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
