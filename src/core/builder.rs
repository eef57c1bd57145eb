use std::collections::{BTreeMap, btree_map::Entry};
use std::sync::Arc;

use crate::{
    actions::ActionRef,
    config::ActionConfig,
    core::{controller::ActionController, group::ActionGroup},
    error::GroupError,
    events::Bus,
    subscribers::{Observer, Subscribe},
};

/// Builder for an [`ActionGroup`].
pub struct ActionGroupBuilder<Args, T> {
    config: ActionConfig<T>,
    actions: Vec<ActionRef<Args, T>>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl<Args, T> ActionGroupBuilder<Args, T>
where
    Args: Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates a new builder; every member gets a clone of `config`.
    pub fn new(config: ActionConfig<T>) -> Self {
        Self {
            config,
            actions: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Adds one member.
    pub fn with_action(mut self, action: ActionRef<Args, T>) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds several members.
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = ActionRef<Args, T>>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive events from every member through dedicated workers
    /// with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the group.
    ///
    /// Fails with [`GroupError::DuplicateAction`] when two actions share a name.
    /// The subscriber listener is spawned only when subscribers were given, in
    /// which case this must be called inside a Tokio runtime.
    pub fn build(self) -> Result<ActionGroup<Args, T>, GroupError> {
        let bus = Bus::new(self.config.bus_capacity_clamped());

        let mut members = BTreeMap::new();
        for action in self.actions {
            match members.entry(action.name().to_string()) {
                Entry::Occupied(e) => {
                    return Err(GroupError::DuplicateAction {
                        name: e.key().clone(),
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(ActionController::with_bus(
                        action,
                        self.config.clone(),
                        bus.clone(),
                    ));
                }
            }
        }

        let observer = if self.subscribers.is_empty() {
            None
        } else {
            Some(Observer::spawn(self.subscribers, &bus))
        };
        Ok(ActionGroup::from_parts(members, bus, observer))
    }
}
