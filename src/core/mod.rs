mod builder;
mod controller;
mod group;
mod runner;
mod state;

pub use builder::ActionGroupBuilder;
pub use controller::{ActionController, Execution};
pub use group::ActionGroup;
pub use state::{ActionState, ActionStatus};
