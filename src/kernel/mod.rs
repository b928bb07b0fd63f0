//! Headless playground core (state/action/effect).

pub mod action;
pub mod diff;
pub mod effect;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use diff::{diff, FileDiff};
pub use effect::Effect;
pub use state::{
    validate_working_set, EditorOptions, ExecutionModel, FileMap, PlaygroundState, Scaffold,
    ValidationOutcome,
};
pub use store::{DispatchResult, Store};
