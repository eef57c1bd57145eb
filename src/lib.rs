//! # actionvisor
//!
//! **Actionvisor** wraps user-supplied async operations ("actions") in a
//! controller that owns their invocation lifecycle.
//!
//! A controller guarantees that only the latest invocation may publish its
//! outcome, cancels superseded work, optionally deduplicates concurrent calls,
//! enforces a timeout, and tears everything down when it is dropped. An
//! [`ActionGroup`] bundles several controllers under one configuration and
//! answers "is anything running?" for the whole set.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    Action    │   │    Action    │   │    Action    │
//!     │  ("render")  │   │  ("caption") │   │  ("upscale") │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Controller  │   │  Controller  │   │  Controller  │
//!     │ slot + state │   │ slot + state │   │ slot + state │
//!     └┬─────────────┘   └┬─────────────┘   └┬─────────────┘
//!      │                  │                  │
//!      │ Publishes:       │                  │
//!      │ - ActionStarting │                  │
//!      │ - ActionFailed   │       ...        │       ...
//!      │ - ActionDiscarded│                  │
//!      ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                     Bus (broadcast channel)                       │
//! │                (capacity: ActionConfig::bus_capacity)             │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       ┌────────────────────────┐
//!                       │        Observer        │
//!                       │    (listener task)     │
//!                       └───────────┬────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                         (per-sub bounded queues)
//!                         ┌─────────┼─────────┐
//!                         ▼         ▼         ▼
//!                       sub1      sub2      subN
//! ```
//!
//! ### Invocation lifecycle
//! ```text
//! execute(args)
//!   ├─► duplicate guard: in flight && prevent_duplicate_calls ─► return shared Execution
//!   ├─► cancel previous invocation (ActionSuperseded)
//!   ├─► id += 1, child token, state = Running (ActionStarting)
//!   └─► spawn run_once(action.spawn(args, token), timeout)
//!           │
//!           ├─ stale (id != live id) ─► ActionDiscarded, resolve None
//!           ├─ Ok(v)                 ─► Succeeded{v}, on_success(v), resolve Some(v)
//!           ├─ Err(Canceled)         ─► Cancelled,                   resolve None
//!           └─ Err(Fail|Timeout)     ─► Failed{e},   on_error(e),    resolve None
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                       |
//! |-------------------|--------------------------------------------------------------|------------------------------------------|
//! | **Actions**       | Define cancelable async operations taking arguments.          | [`Action`], [`ActionFn`], [`ActionRef`]  |
//! | **Controller**    | Latest-wins invocation with dedup, timeout and teardown.      | [`ActionController`], [`Execution`]      |
//! | **Groups**        | Fixed set of named controllers with aggregate status.         | [`ActionGroup`]                          |
//! | **State**         | Observable status/result/error snapshot.                      | [`ActionState`], [`ActionStatus`]        |
//! | **Subscriber API**| Hook into lifecycle events (logging, metrics, custom).        | [`Subscribe`], [`Observer`]              |
//! | **Errors**        | Typed invocation and group errors.                            | [`ActionError`], [`GroupError`]          |
//! | **Configuration** | Hooks, dedup, timeout and bus sizing.                         | [`ActionConfig`]                         |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] that renders events through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use actionvisor::{ActionConfig, ActionController, ActionError, ActionFn, ActionRef, ActionStatus};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let fetch: ActionRef<u32, String> = ActionFn::arc("fetch", |id: u32, ctx: CancellationToken| async move {
//!         tokio::select! {
//!             _ = ctx.cancelled() => Err(ActionError::Canceled),
//!             _ = tokio::time::sleep(Duration::from_millis(5)) => Ok(format!("item-{id}")),
//!         }
//!     });
//!
//!     let cfg = ActionConfig::default().with_timeout(Duration::from_secs(1));
//!     let ctrl = ActionController::new(fetch, cfg);
//!
//!     // The first call is superseded by the second and resolves to None.
//!     let first = ctrl.execute(1);
//!     let second = ctrl.execute(2);
//!
//!     assert_eq!(first.await, None);
//!     assert_eq!(second.await.as_deref(), Some("item-2"));
//!     assert_eq!(ctrl.status(), ActionStatus::Succeeded);
//! }
//! ```
mod actions;
mod config;
mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use actions::{Action, ActionFn, ActionRef, BoxActionFuture};
pub use config::{ActionConfig, ErrorHook, SuccessHook};
pub use crate::core::{
    ActionController, ActionGroup, ActionGroupBuilder, ActionState, ActionStatus, Execution,
};
pub use error::{ActionError, GroupError};
pub use events::{Bus, Event, EventKind};
pub use subscribers::{Observer, Subscribe, SubscriberSet};

// Optional: expose a built-in logger subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
