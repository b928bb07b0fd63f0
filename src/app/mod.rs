//! Orchestrating container wiring the store to both adapters.

mod session;

pub use session::PlaygroundSession;
