//! # Action abstraction.
//!
//! Defines the [`Action`] trait (async, cancelable, parameterized over its
//! arguments) and the shared handle type [`ActionRef`].
//!
//! An action receives a [`CancellationToken`] with every call. The token is
//! cancelled when the invocation is superseded, explicitly cancelled, timed
//! out, or when the owning controller is dropped. Actions that hold resources
//! outside their own future (spawned requests, open streams) should watch it
//! and return [`ActionError::Canceled`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::ActionError;

/// Boxed future returned by [`Action::spawn`].
pub type BoxActionFuture<T> = Pin<Box<dyn Future<Output = Result<T, ActionError>> + Send + 'static>>;

/// Shared handle to an action with arguments `Args` and result `T`.
pub type ActionRef<Args, T> = Arc<dyn Action<Args, Output = T>>;

/// # Asynchronous, cancelable operation.
///
/// An `Action` has a stable [`name`](Action::name) and produces a fresh future
/// per call via [`spawn`](Action::spawn).
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use actionvisor::{Action, ActionError, BoxActionFuture};
///
/// struct Render;
///
/// impl Action<String> for Render {
///     type Output = String;
///
///     fn name(&self) -> &str { "render" }
///
///     fn spawn(&self, prompt: String, ctx: CancellationToken) -> BoxActionFuture<String> {
///         Box::pin(async move {
///             if ctx.is_cancelled() {
///                 return Err(ActionError::Canceled);
///             }
///             Ok(format!("rendered: {prompt}"))
///         })
///     }
/// }
/// ```
pub trait Action<Args>: Send + Sync + 'static {
    /// Value produced by a successful invocation.
    type Output: Clone + Send + Sync + 'static;

    /// Returns a stable, human-readable action name.
    fn name(&self) -> &str;

    /// Creates the future for one invocation.
    ///
    /// Must not block; all work happens when the returned future is polled.
    fn spawn(&self, args: Args, ctx: CancellationToken) -> BoxActionFuture<Self::Output>;
}
