//! # Per-action configuration.
//!
//! Provides [`ActionConfig`], the settings a controller applies to every invocation.
//!
//! Config is used in two ways:
//! 1. **Controller creation**: `ActionController::new(action, config)`
//! 2. **Group defaults**: one config is cloned into every member of an [`ActionGroup`](crate::ActionGroup)
//!
//! ## Sentinel values
//! - `timeout = 0s` → no timeout (see [`ActionConfig::default_timeout`])
//! - `bus_capacity = 0` → clamped to 1

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::ActionError;

/// Effect invoked with the value of a successful, non-stale invocation.
pub type SuccessHook<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

/// Effect invoked with the error of a failed (or timed-out), non-stale invocation.
pub type ErrorHook = Arc<dyn Fn(&ActionError) + Send + Sync + 'static>;

/// Configuration for an [`ActionController`](crate::ActionController).
///
/// ## Field semantics
/// - `on_success`: called exactly once per successful completion that is still current
/// - `on_error`: called exactly once per failed completion that is still current;
///   when `None` the failure is only recorded in state
/// - `prevent_duplicate_calls`: attach to the in-flight invocation instead of superseding it
/// - `timeout`: per-invocation deadline (`0s` = no timeout)
/// - `bus_capacity`: capacity of the event bus a standalone controller creates
///
/// Hooks run after the controller's state has been updated and outside of any
/// internal lock, so they may call back into the controller.
pub struct ActionConfig<T> {
    /// Success effect.
    pub on_success: Option<SuccessHook<T>>,

    /// Failure effect (natural failures and timeouts, never cancellation).
    pub on_error: Option<ErrorHook>,

    /// When `true`, `execute()` while an invocation is in flight returns the
    /// pending [`Execution`](crate::Execution) instead of starting a new one.
    pub prevent_duplicate_calls: bool,

    /// Per-invocation timeout.
    ///
    /// - `Duration::ZERO` = no timeout
    /// - `> 0` = the invocation is cancelled and recorded as
    ///   [`ActionError::Timeout`] once it runs this long
    pub timeout: Duration,

    /// Capacity of the event bus ring buffer (min 1).
    pub bus_capacity: usize,
}

impl<T> ActionConfig<T> {
    /// Returns the timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → applied to every invocation
    #[inline]
    pub fn default_timeout(&self) -> Option<Duration> {
        if self.timeout == Duration::ZERO {
            None
        } else {
            Some(self.timeout)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns a new config with the success effect set.
    pub fn with_on_success(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(f));
        self
    }

    /// Returns a new config with the failure effect set.
    pub fn with_on_error(mut self, f: impl Fn(&ActionError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }

    /// Returns a new config with deduplication toggled.
    pub fn with_prevent_duplicate_calls(mut self, enabled: bool) -> Self {
        self.prevent_duplicate_calls = enabled;
        self
    }

    /// Returns a new config with updated timeout (`Duration::ZERO` disables it).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns a new config with updated bus capacity.
    pub fn with_bus_capacity(mut self, capacity: usize) -> Self {
        self.bus_capacity = capacity;
        self
    }
}

impl<T> Default for ActionConfig<T> {
    /// Default configuration:
    ///
    /// - no hooks
    /// - `prevent_duplicate_calls = false` (a new call supersedes the running one)
    /// - `timeout = 0s` (no timeout)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
            prevent_duplicate_calls: false,
            timeout: Duration::ZERO,
            bus_capacity: 1024,
        }
    }
}

impl<T> Clone for ActionConfig<T> {
    fn clone(&self) -> Self {
        Self {
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
            prevent_duplicate_calls: self.prevent_duplicate_calls,
            timeout: self.timeout,
            bus_capacity: self.bus_capacity,
        }
    }
}

impl<T> fmt::Debug for ActionConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("prevent_duplicate_calls", &self.prevent_duplicate_calls)
            .field("timeout", &self.timeout)
            .field("bus_capacity", &self.bus_capacity)
            .finish()
    }
}
