use std::future::Future;
use std::pin::Pin;

pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Fire-and-forget task spawning. Production uses the tokio-backed
/// `AsyncRuntime`; tests swap in deterministic executors.
pub trait AsyncExecutor: Send + Sync {
    fn spawn(&self, task: BoxFuture);
}
