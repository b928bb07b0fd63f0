//! Boundary layer: the action bus, ports (traits + wire types) for every
//! external collaborator, and the adapters that implement them.

pub mod adapters;
pub mod bus;
pub mod ports;

pub use bus::{action_bus, ActionReceiver, ActionSender};
