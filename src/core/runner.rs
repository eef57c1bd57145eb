//! # Run a single invocation.
//!
//! Drives one action future to completion under its cancellation token and
//! optional timeout, and classifies the outcome.
//!
//! ## Outcome mapping
//! ```text
//! action future → Ok(v)              → Ok(v)
//!               → Err(e)             → Err(e)
//!               → panic              → Err(Fail("panicked: ..."))
//! token cancelled first              → Err(Canceled)       (future dropped)
//! timeout elapsed → cancel token     → publish TimeoutHit
//!                                    → Err(Timeout)        (future dropped)
//! ```
//!
//! ## Rules
//! - The action future is dropped as soon as the token fires; the action sees
//!   the same token and may release outside resources when it does.
//! - The timer lives inside this future, so it is disarmed on every exit path.
//! - Whether the outcome is still current is decided by the caller, not here.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::{
    actions::BoxActionFuture,
    error::ActionError,
    events::{Bus, Event, EventKind},
    subscribers::panic_message,
};

/// Executes one invocation of an action.
pub(crate) async fn run_once<T>(
    name: &Arc<str>,
    invocation: u64,
    fut: BoxActionFuture<T>,
    token: &CancellationToken,
    timeout: Option<Duration>,
    bus: &Bus,
) -> Result<T, ActionError> {
    let guarded = async {
        tokio::select! {
            biased;
            _ = token.cancelled() => Err(ActionError::Canceled),
            res = AssertUnwindSafe(fut).catch_unwind() => res.unwrap_or_else(|payload| {
                let msg = panic_message(&*payload);
                tracing::warn!(action = %name, invocation, panic = %msg, "action panicked");
                Err(ActionError::fail(format!("panicked: {msg}")))
            }),
        }
    };

    match timeout {
        Some(dur) => match time::timeout(dur, guarded).await {
            Ok(res) => res,
            Err(_elapsed) => {
                token.cancel();
                bus.publish(
                    Event::new(EventKind::TimeoutHit)
                        .with_action(Arc::clone(name))
                        .with_invocation(invocation)
                        .with_timeout(dur),
                );
                Err(ActionError::Timeout { timeout: dur })
            }
        },
        None => guarded.await,
    }
}
