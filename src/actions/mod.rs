//! # Action abstractions.
//!
//! This module provides the wrapped-operation types:
//! - [`Action`] - trait for async, cancelable operations taking arguments
//! - [`ActionFn`] - closure-backed implementation
//! - [`ActionRef`] - shared reference to an action (`Arc<dyn Action<..>>`)

mod action;
mod action_fn;

pub use action::{Action, ActionRef, BoxActionFuture};
pub use action_fn::ActionFn;
