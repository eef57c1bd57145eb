//! Error types used by action controllers and groups.
//!
//! This module defines two error enums:
//!
//! - [`ActionError`]: the outcome of a single failed invocation.
//! - [`GroupError`]: misuse of an [`ActionGroup`](crate::ActionGroup) (unknown or duplicate names).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;

/// # Errors produced by an invocation.
///
/// Actions return these from their futures, and controllers record them in
/// [`ActionState::error`](crate::ActionState::error).
///
/// - `Fail` is a natural failure (the action rejected for a domain reason).
/// - `Timeout` means the configured deadline was exceeded.
/// - `Canceled` means the action observed its token and aborted.
///
/// Supersession is never an error: a superseded invocation is discarded silently.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Invocation exceeded its timeout duration.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout: Duration,
    },

    /// The action failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The action aborted after its cancellation token fired.
    #[error("invocation cancelled")]
    Canceled,
}

impl ActionError {
    /// Builds a [`ActionError::Fail`] from anything printable.
    ///
    /// # Example
    /// ```
    /// use actionvisor::ActionError;
    ///
    /// let err = ActionError::fail("quota exceeded");
    /// assert_eq!(err.to_string(), "execution failed: quota exceeded");
    /// ```
    pub fn fail(error: impl Display) -> Self {
        ActionError::Fail {
            error: error.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use actionvisor::ActionError;
    /// use std::time::Duration;
    ///
    /// let err = ActionError::Timeout { timeout: Duration::from_secs(1) };
    /// assert_eq!(err.as_label(), "action_timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::Timeout { .. } => "action_timeout",
            ActionError::Fail { .. } => "action_failed",
            ActionError::Canceled => "action_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActionError::Timeout { timeout } => format!("timeout: {timeout:?}"),
            ActionError::Fail { error } => format!("error: {error}"),
            ActionError::Canceled => "invocation cancelled".to_string(),
        }
    }

    /// True for [`ActionError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, ActionError::Timeout { .. })
    }

    /// True for [`ActionError::Canceled`].
    pub fn is_canceled(&self) -> bool {
        matches!(self, ActionError::Canceled)
    }

    /// Indicates whether the error is reported through `on_error` and stored in state.
    ///
    /// Returns `true` for [`ActionError::Fail`] and [`ActionError::Timeout`],
    /// `false` for cancellation.
    ///
    /// # Example
    /// ```
    /// use actionvisor::ActionError;
    ///
    /// assert!(ActionError::fail("boom").is_reportable());
    /// assert!(!ActionError::Canceled.is_reportable());
    /// ```
    pub fn is_reportable(&self) -> bool {
        matches!(self, ActionError::Fail { .. } | ActionError::Timeout { .. })
    }
}

/// # Errors produced by [`ActionGroup`](crate::ActionGroup) lookups and construction.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// No member is registered under this name.
    #[error("unknown action: {name}")]
    UnknownAction {
        /// The requested name.
        name: String,
    },

    /// Two actions passed to the builder share a name.
    #[error("duplicate action: {name}")]
    DuplicateAction {
        /// The conflicting name.
        name: String,
    },
}

impl GroupError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            GroupError::UnknownAction { .. } => "group_unknown_action",
            GroupError::DuplicateAction { .. } => "group_duplicate_action",
        }
    }
}
