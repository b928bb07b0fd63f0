//! Executor implementations behind the `AsyncExecutor` port.

mod runtime;

pub use runtime::{AsyncRuntime, ImmediateExecutor};
