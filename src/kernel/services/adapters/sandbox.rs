//! Sandbox bridge: owns the lifecycle of one execution host instance keyed
//! by challenge identity. Identity changes trigger full reinitialization;
//! content changes are reconciled as diffs against the last successfully
//! applied snapshot. Host calls run on the executor and report back through
//! an event channel drained by `pump`.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::kernel::diff::diff;
use crate::kernel::services::ports::runtime::AsyncExecutor;
use crate::kernel::services::ports::sandbox::{
    ExecutionHost, HostHandle, HostProject, HostUpdate,
};
use crate::kernel::state::{FileMap, PlaygroundState};
use crate::kernel::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostPhase {
    Uninitialized,
    Initializing,
    Ready,
    /// Initialization failed for the current identity; stays failed until
    /// the identity changes so a broken host is not hammered every tick.
    Failed,
    Disposed,
}

#[derive(Debug)]
enum HostEvent {
    Initialized {
        generation: u64,
        challenge_id: String,
        handle: HostHandle,
        files: FileMap,
    },
    InitFailed {
        generation: u64,
        error: String,
    },
    Applied {
        generation: u64,
        snapshot: FileMap,
    },
    ApplyFailed {
        generation: u64,
        error: String,
    },
}

struct ActiveInstance {
    challenge_id: String,
    handle: HostHandle,
    /// Last snapshot the host confirmed. Advances only on successful apply,
    /// so a failed partial update is retried by the next diff.
    baseline: FileMap,
}

pub struct SandboxBridge {
    host: Arc<dyn ExecutionHost>,
    executor: Arc<dyn AsyncExecutor>,
    tx: Sender<HostEvent>,
    rx: Receiver<HostEvent>,
    instance: Option<ActiveInstance>,
    /// Identity an in-flight (or failed) initialization belongs to.
    target_id: Option<String>,
    /// Bumped on every identity change and teardown. Initialization is not
    /// cancellable; results captured under an older generation are stale
    /// and discarded in `pump`.
    generation: u64,
    phase: HostPhase,
    apply_inflight: bool,
    failed: bool,
    last_status: Option<(bool, bool)>,
}

impl SandboxBridge {
    pub fn new(host: Arc<dyn ExecutionHost>, executor: Arc<dyn AsyncExecutor>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            host,
            executor,
            tx,
            rx,
            instance: None,
            target_id: None,
            generation: 0,
            phase: HostPhase::Uninitialized,
            apply_inflight: false,
            failed: false,
            last_status: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.apply_inflight || self.phase == HostPhase::Initializing
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    fn current_id(&self) -> Option<&str> {
        self.instance
            .as_ref()
            .map(|i| i.challenge_id.as_str())
            .or(self.target_id.as_deref())
    }

    /// Reconciles the host with the given state. Safe to call every tick:
    /// no-ops when nothing changed or while a call is in flight.
    pub fn sync(&mut self, state: &PlaygroundState) {
        if self.phase == HostPhase::Disposed {
            return;
        }

        let Some(model) = &state.model else {
            self.clear();
            return;
        };

        if self.current_id() != Some(model.id.as_str()) {
            self.begin_initialize(state);
        } else if self.phase == HostPhase::Ready && !self.apply_inflight {
            self.begin_apply(state);
        }
        // Initializing / Failed / in-flight apply: edits are captured by the
        // next diff cycle once the outstanding call settles.
    }

    /// Discards the current instance and returns to the uninitialized
    /// phase. Teardown is best-effort.
    pub fn clear(&mut self) {
        if self.instance.is_none() && self.target_id.is_none() {
            return;
        }
        self.generation += 1;
        self.teardown_instance();
        self.target_id = None;
        self.phase = HostPhase::Uninitialized;
        self.apply_inflight = false;
        self.failed = false;
    }

    /// End of adapter lifetime; the bridge refuses further syncs.
    pub fn dispose(&mut self) {
        self.clear();
        self.phase = HostPhase::Disposed;
    }

    /// Drains host events, discarding stale generations, and returns status
    /// actions for the store.
    pub fn pump(&mut self) -> Vec<Action> {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
        }

        let status = (self.is_busy(), self.failed);
        if self.last_status == Some(status) {
            return Vec::new();
        }
        self.last_status = Some(status);
        vec![Action::SandboxStatus {
            busy: status.0,
            failed: status.1,
        }]
    }

    fn handle_event(&mut self, event: HostEvent) {
        let generation = match &event {
            HostEvent::Initialized { generation, .. }
            | HostEvent::InitFailed { generation, .. }
            | HostEvent::Applied { generation, .. }
            | HostEvent::ApplyFailed { generation, .. } => *generation,
        };
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding stale host event"
            );
            // A stale init still produced a live instance; the result is
            // dropped but the instance must not outlive its supersession.
            if let HostEvent::Initialized { handle, .. } = event {
                let host = Arc::clone(&self.host);
                self.executor.spawn(Box::pin(async move {
                    host.teardown(handle);
                }));
            }
            return;
        }

        match event {
            HostEvent::Initialized {
                challenge_id,
                handle,
                files,
                ..
            } => {
                tracing::info!(%challenge_id, handle = handle.0, "sandbox initialized");
                self.instance = Some(ActiveInstance {
                    challenge_id,
                    handle,
                    baseline: files,
                });
                self.target_id = None;
                self.phase = HostPhase::Ready;
                self.failed = false;
            }
            HostEvent::InitFailed { error, .. } => {
                tracing::warn!(%error, "sandbox initialization failed");
                self.phase = HostPhase::Failed;
                self.failed = true;
            }
            HostEvent::Applied { snapshot, .. } => {
                self.apply_inflight = false;
                self.failed = false;
                if let Some(instance) = &mut self.instance {
                    instance.baseline = snapshot;
                }
            }
            HostEvent::ApplyFailed { error, .. } => {
                tracing::warn!(%error, "sandbox update failed; baseline unchanged");
                self.apply_inflight = false;
                self.failed = true;
            }
        }
    }

    fn begin_initialize(&mut self, state: &PlaygroundState) {
        let Some(model) = &state.model else {
            return;
        };

        self.generation += 1;
        self.teardown_instance();
        self.target_id = Some(model.id.clone());
        self.phase = HostPhase::Initializing;
        self.apply_inflight = false;
        self.failed = false;

        let files = state.working.clone();
        let open_file = state
            .active_file
            .clone()
            .unwrap_or_else(|| model.default_file.clone());
        let project = HostProject {
            files: files.clone(),
            open_file,
            theme: model.editor.theme.clone(),
        };

        let host = Arc::clone(&self.host);
        let tx = self.tx.clone();
        let generation = self.generation;
        let challenge_id = model.id.clone();
        tracing::info!(%challenge_id, files = files.len(), "sandbox full reinitialization");

        self.executor.spawn(Box::pin(async move {
            let event = match host.initialize(project) {
                Ok(handle) => HostEvent::Initialized {
                    generation,
                    challenge_id,
                    handle,
                    files,
                },
                Err(e) => HostEvent::InitFailed {
                    generation,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event);
        }));
    }

    fn begin_apply(&mut self, state: &PlaygroundState) {
        let Some(instance) = &self.instance else {
            return;
        };

        let delta = diff(&instance.baseline, &state.working);
        if delta.is_empty() {
            return;
        }

        // Modified files go through `create`; the host treats creation and
        // content replacement as the same call.
        let mut create = FileMap::default();
        for path in delta.create.iter().chain(delta.update.iter()) {
            if let Some(content) = state.working.get(path) {
                create.insert(path.clone(), content.clone());
            }
        }
        let update = HostUpdate {
            create,
            destroy: delta.destroy,
        };
        let snapshot = state.working.clone();

        self.apply_inflight = true;

        let host = Arc::clone(&self.host);
        let tx = self.tx.clone();
        let generation = self.generation;
        let handle = instance.handle.clone();
        tracing::debug!(
            create = update.create.len(),
            destroy = update.destroy.len(),
            "sandbox incremental update"
        );

        self.executor.spawn(Box::pin(async move {
            let event = match host.apply(&handle, update) {
                Ok(()) => HostEvent::Applied {
                    generation,
                    snapshot,
                },
                Err(e) => HostEvent::ApplyFailed {
                    generation,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(event);
        }));
    }

    fn teardown_instance(&mut self) {
        if let Some(instance) = self.instance.take() {
            let host = Arc::clone(&self.host);
            self.executor.spawn(Box::pin(async move {
                host.teardown(instance.handle);
            }));
        }
    }
}
