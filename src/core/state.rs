//! # Observable controller state.
//!
//! [`ActionState`] is owned by one controller, mutated only by it, and read by callers
//! either as a snapshot or through a `watch` receiver.
//!
//! ## Invariants
//! - `result` is `Some` only when `status == Succeeded`
//! - `error` is `Some` only when `status == Failed`
//! - both are cleared when a new invocation starts

use crate::error::ActionError;

/// Lifecycle status of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStatus {
    /// Nothing running; initial state and the state after `cancel()` / `reset()`.
    #[default]
    Idle,
    /// An invocation is in flight.
    Running,
    /// The last current invocation succeeded.
    Succeeded,
    /// The last current invocation failed or timed out.
    Failed,
    /// The last current invocation aborted itself after cancellation.
    Cancelled,
}

impl ActionStatus {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionStatus::Idle => "idle",
            ActionStatus::Running => "running",
            ActionStatus::Succeeded => "succeeded",
            ActionStatus::Failed => "failed",
            ActionStatus::Cancelled => "cancelled",
        }
    }
}

/// Snapshot of a controller's state.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionState<T> {
    /// Current status.
    pub status: ActionStatus,
    /// Value of the last successful invocation.
    pub result: Option<T>,
    /// Error of the last failed invocation.
    pub error: Option<ActionError>,
    /// Id of the invocation that last wrote the state (`0` before the first `execute()`).
    pub invocation: u64,
}

impl<T> ActionState<T> {
    pub(crate) fn running(invocation: u64) -> Self {
        Self {
            status: ActionStatus::Running,
            result: None,
            error: None,
            invocation,
        }
    }

    pub(crate) fn succeeded(invocation: u64, value: T) -> Self {
        Self {
            status: ActionStatus::Succeeded,
            result: Some(value),
            error: None,
            invocation,
        }
    }

    pub(crate) fn failed(invocation: u64, error: ActionError) -> Self {
        Self {
            status: ActionStatus::Failed,
            result: None,
            error: Some(error),
            invocation,
        }
    }

    pub(crate) fn cancelled(invocation: u64) -> Self {
        Self {
            status: ActionStatus::Cancelled,
            result: None,
            error: None,
            invocation,
        }
    }

    /// Moves to `Idle` and clears result/error, keeping the invocation id.
    pub(crate) fn clear(&mut self) {
        self.status = ActionStatus::Idle;
        self.result = None;
        self.error = None;
    }

    /// True while an invocation is in flight.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == ActionStatus::Running
    }
}

impl<T> Default for ActionState<T> {
    fn default() -> Self {
        Self {
            status: ActionStatus::Idle,
            result: None,
            error: None,
            invocation: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_and_error_are_exclusive() {
        let ok = ActionState::succeeded(1, 5u32);
        assert!(ok.result.is_some() && ok.error.is_none());

        let failed = ActionState::<u32>::failed(2, ActionError::fail("boom"));
        assert!(failed.result.is_none() && failed.error.is_some());

        let running = ActionState::<u32>::running(3);
        assert!(running.is_running());
        assert!(running.result.is_none() && running.error.is_none());
    }

    #[test]
    fn test_clear_keeps_invocation() {
        let mut s = ActionState::succeeded(4, "done");
        s.clear();
        assert_eq!(s.status, ActionStatus::Idle);
        assert_eq!(s.result, None);
        assert_eq!(s.invocation, 4);
    }
}
