//! # ActionGroup: named controllers sharing one configuration.
//!
//! ```text
//! ActionGroup::builder(cfg)
//!     .with_actions([render, caption, upscale])
//!     .with_subscribers(subs)
//!     .build()
//!         │
//!         ├─► Bus (shared by all members)
//!         ├─► Observer (only when subscribers were given)
//!         └─► BTreeMap<name, ActionController>   (fixed membership)
//!
//! any_running() = members.any(status == Running)
//! cancel_all()  = members.for_each(cancel)   ─► GroupCancelAll
//! ```
//!
//! ## Rules
//! - Membership is fixed at construction; only member state changes afterwards.
//! - `any_running()` is derived from member state on every read, never stored.
//! - After `cancel_all()` returns, no member has an in-flight handle; cancelled
//!   actions may still be unwinding on their own tasks.

use std::collections::BTreeMap;

use futures::future::select_all;
use tokio::sync::{broadcast, watch};

use crate::{
    config::ActionConfig,
    core::builder::ActionGroupBuilder,
    core::controller::{ActionController, Execution},
    core::state::ActionState,
    error::GroupError,
    events::{Bus, Event, EventKind},
    subscribers::Observer,
};

/// A fixed set of [`ActionController`]s keyed by action name.
///
/// # Example
/// ```rust
/// use tokio_util::sync::CancellationToken;
/// use actionvisor::{ActionConfig, ActionFn, ActionGroup, ActionRef};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), actionvisor::GroupError> {
///     let shout: ActionRef<String, String> =
///         ActionFn::arc("shout", |s: String, _ctx: CancellationToken| async move { Ok(s.to_uppercase()) });
///     let whisper: ActionRef<String, String> =
///         ActionFn::arc("whisper", |s: String, _ctx: CancellationToken| async move { Ok(s.to_lowercase()) });
///
///     let group = ActionGroup::new([shout, whisper], ActionConfig::default())?;
///     let loud = group.execute("shout", "hello".to_string())?.await;
///
///     assert_eq!(loud.as_deref(), Some("HELLO"));
///     assert!(!group.any_running());
///     Ok(())
/// }
/// ```
pub struct ActionGroup<Args, T> {
    members: BTreeMap<String, ActionController<Args, T>>,
    bus: Bus,
    observer: Option<Observer>,
}

impl<Args, T> ActionGroup<Args, T>
where
    Args: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Returns a builder for a group sharing `config`.
    pub fn builder(config: ActionConfig<T>) -> ActionGroupBuilder<Args, T> {
        ActionGroupBuilder::new(config)
    }

    /// Builds a group without subscribers.
    pub fn new(
        actions: impl IntoIterator<Item = crate::ActionRef<Args, T>>,
        config: ActionConfig<T>,
    ) -> Result<Self, GroupError> {
        Self::builder(config).with_actions(actions).build()
    }

    pub(crate) fn from_parts(
        members: BTreeMap<String, ActionController<Args, T>>,
        bus: Bus,
        observer: Option<Observer>,
    ) -> Self {
        Self {
            members,
            bus,
            observer,
        }
    }

    /// Member controller by name.
    pub fn get(&self, name: &str) -> Option<&ActionController<Args, T>> {
        self.members.get(name)
    }

    /// Member controller by name, or [`GroupError::UnknownAction`].
    pub fn controller(&self, name: &str) -> Result<&ActionController<Args, T>, GroupError> {
        self.get(name).ok_or_else(|| GroupError::UnknownAction {
            name: name.to_string(),
        })
    }

    /// Forwards to [`ActionController::execute`].
    pub fn execute(&self, name: &str, args: Args) -> Result<Execution<T>, GroupError> {
        Ok(self.controller(name)?.execute(args))
    }

    /// Forwards to [`ActionController::cancel`].
    pub fn cancel(&self, name: &str) -> Result<(), GroupError> {
        self.controller(name)?.cancel();
        Ok(())
    }

    /// Forwards to [`ActionController::reset`].
    pub fn reset(&self, name: &str) -> Result<(), GroupError> {
        self.controller(name)?.reset();
        Ok(())
    }

    /// Forwards to [`ActionController::state`].
    pub fn state(&self, name: &str) -> Result<ActionState<T>, GroupError> {
        Ok(self.controller(name)?.state())
    }

    /// Sorted member names.
    pub fn names(&self) -> Vec<&str> {
        self.members.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True iff at least one member is `Running`.
    pub fn any_running(&self) -> bool {
        self.members.values().any(ActionController::is_running)
    }

    /// Sorted names of running members.
    pub fn running(&self) -> Vec<String> {
        self.members
            .iter()
            .filter(|(_, c)| c.is_running())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Resolves on the next state change of any member.
    ///
    /// Returns immediately for an empty group.
    pub async fn changed(&self) {
        let mut rxs = self.receivers();
        wait_any(&mut rxs).await;
    }

    /// Resolves once no member is `Running`.
    pub async fn wait_idle(&self) {
        let mut rxs = self.receivers();
        loop {
            if rxs.iter_mut().all(|rx| !rx.borrow_and_update().is_running()) {
                return;
            }
            wait_any(&mut rxs).await;
        }
    }

    /// Cancels every member.
    ///
    /// When this returns no member has an in-flight handle and every member
    /// that had one is `Idle`.
    pub fn cancel_all(&self) {
        let cancelled = self
            .members
            .values()
            .filter_map(ActionController::cancel_in_flight)
            .count();
        self.bus.publish(
            Event::new(EventKind::GroupCancelAll).with_reason(format!("{cancelled} in flight")),
        );
    }

    /// Bus shared by all members.
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Raw receiver of events from every member.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Cancels all members and waits for subscribers to drain.
    pub async fn shutdown(self) {
        self.cancel_all();
        if let Some(observer) = self.observer {
            observer.shutdown().await;
        }
    }

    fn receivers(&self) -> Vec<watch::Receiver<ActionState<T>>> {
        self.members.values().map(ActionController::watch).collect()
    }
}

/// Waits until any receiver sees a change (or its sender is gone).
async fn wait_any<S>(rxs: &mut [watch::Receiver<S>]) {
    if rxs.is_empty() {
        return;
    }
    let _ = select_all(rxs.iter_mut().map(|rx| Box::pin(rx.changed()))).await;
}
