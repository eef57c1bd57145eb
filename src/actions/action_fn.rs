//! # Function-backed action (`ActionFn`)
//!
//! [`ActionFn`] wraps a closure `F: Fn(Args, CancellationToken) -> Fut`, producing a fresh
//! future per invocation.
//!
//! ## Concurrency semantics
//! - Each call to [`Action::spawn`] creates a **new** future that owns its state.
//! - No hidden mutation between invocations; share state explicitly with `Arc<...>`
//!   inside the closure.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use actionvisor::{ActionFn, ActionRef, ActionError};
//!
//! let a: ActionRef<u32, u32> = ActionFn::arc("double", |n: u32, _ctx: CancellationToken| async move {
//!     Ok::<_, ActionError>(n * 2)
//! });
//!
//! assert_eq!(a.name(), "double");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::actions::action::{Action, BoxActionFuture};
use crate::error::ActionError;

/// Function-backed action implementation.
///
/// Wraps a closure that *creates* a new future per invocation.
#[derive(Debug)]
pub struct ActionFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ActionFn<F> {
    /// Creates a new function-backed action.
    ///
    /// Prefer [`ActionFn::arc`] when you immediately need an [`ActionRef`](crate::ActionRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the action and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<Args, T, F, Fut> Action<Args> for ActionFn<F>
where
    F: Fn(Args, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ActionError>> + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn spawn(&self, args: Args, ctx: CancellationToken) -> BoxActionFuture<T> {
        Box::pin((self.f)(args, ctx))
    }
}
