use std::io;

use crate::kernel::services::ports::runtime::{AsyncExecutor, BoxFuture};

/// Tokio-backed executor for production use. Host and loader calls may
/// block for seconds; the multi-thread runtime keeps them off the dispatch
/// thread.
pub struct AsyncRuntime {
    rt: tokio::runtime::Runtime,
}

impl AsyncRuntime {
    pub fn new() -> io::Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("codelab-worker")
            .enable_all()
            .build()?;
        Ok(Self { rt })
    }
}

impl AsyncExecutor for AsyncRuntime {
    fn spawn(&self, task: BoxFuture) {
        self.rt.spawn(task);
    }
}

/// Runs every spawned task to completion on the calling thread. Makes the
/// async suspension points deterministic for headless runs and tests.
pub struct ImmediateExecutor {
    rt: tokio::runtime::Runtime,
}

impl ImmediateExecutor {
    pub fn new() -> io::Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        Ok(Self { rt })
    }
}

impl AsyncExecutor for ImmediateExecutor {
    fn spawn(&self, task: BoxFuture) {
        self.rt.block_on(task);
    }
}
