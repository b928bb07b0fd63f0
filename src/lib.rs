//! codelab - playground synchronization engine
//!
//! Module structure:
//! - kernel: headless core (Store, Action, Effect, diff engine)
//! - kernel::services: ports and adapters for catalog, editor and sandbox
//! - app: orchestrating session wiring store and adapters together
//! - runtime: executors behind the AsyncExecutor port

pub mod app;
pub mod kernel;
pub mod logging;
pub mod runtime;
