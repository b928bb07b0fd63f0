use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::kernel::services::adapters::{
    DescriptorLoader, EditorBinding, LoadedChallenge, SandboxBridge,
};
use crate::kernel::services::bus::{action_bus, ActionReceiver, ActionSender};
use crate::kernel::services::ports::config::PlaygroundConfig;
use crate::kernel::services::ports::editor::EditingSurface;
use crate::kernel::services::ports::runtime::AsyncExecutor;
use crate::kernel::services::ports::sandbox::ExecutionHost;
use crate::kernel::state::PlaygroundState;
use crate::kernel::{Action, Effect, Store};

/// Completed descriptor fetch. Tagged with the generation current when the
/// fetch was spawned; a later `open_challenge` makes earlier results stale.
struct LoadEvent {
    generation: u64,
    category: String,
    slug: String,
    result: Result<LoadedChallenge, String>,
}

/// Wires store outputs into both adapters and adapter events back into
/// store actions. No business logic of its own beyond this routing; the
/// binding's own loop suppression handles any state mirrored back toward
/// the editing surface.
pub struct PlaygroundSession {
    store: Store,
    bus_tx: ActionSender,
    bus_rx: ActionReceiver,
    loader: Arc<DescriptorLoader>,
    executor: Arc<dyn AsyncExecutor>,
    load_tx: Sender<LoadEvent>,
    load_rx: Receiver<LoadEvent>,
    /// Bumped per `open_challenge`. Fetches are not cancellable; results
    /// carrying an older generation are dropped in `tick` so a slow earlier
    /// load can never overwrite a newer selection.
    load_generation: u64,
    editor: EditorBinding,
    sandbox: SandboxBridge,
}

impl PlaygroundSession {
    pub fn new(
        loader: Arc<DescriptorLoader>,
        executor: Arc<dyn AsyncExecutor>,
        widget: Box<dyn EditingSurface>,
        host: Arc<dyn ExecutionHost>,
        config: &PlaygroundConfig,
    ) -> Self {
        let (bus_tx, bus_rx) = action_bus();
        let editor = EditorBinding::new(
            widget,
            bus_tx.clone(),
            Duration::from_millis(config.debounce_ms),
        );
        let sandbox = SandboxBridge::new(host, Arc::clone(&executor));
        let (load_tx, load_rx) = mpsc::channel();
        Self {
            store: Store::new(PlaygroundState::with_theme(&config.theme)),
            bus_tx,
            bus_rx,
            loader,
            executor,
            load_tx,
            load_rx,
            load_generation: 0,
            editor,
            sandbox,
        }
    }

    pub fn state(&self) -> &PlaygroundState {
        self.store.state()
    }

    /// Entry point: challenge selection. The descriptor fetch runs on the
    /// executor; its result comes back through the load channel, tagged
    /// with the generation current at spawn time.
    pub fn open_challenge(&mut self, category: &str, slug: &str) {
        self.dispatch(Action::ChallengeLoadStarted {
            category: category.to_string(),
            slug: slug.to_string(),
        });

        self.load_generation += 1;
        let generation = self.load_generation;
        let loader = Arc::clone(&self.loader);
        let tx = self.load_tx.clone();
        let category = category.to_string();
        let slug = slug.to_string();
        self.executor.spawn(Box::pin(async move {
            let result = loader.load(&category, &slug).map_err(|e| e.to_string());
            let _ = tx.send(LoadEvent {
                generation,
                category,
                slug,
                result,
            });
        }));
    }

    /// Entry point: file selection.
    pub fn select_file(&mut self, path: &str) {
        self.dispatch(Action::SetActiveFile {
            path: path.to_string(),
        });
    }

    /// Raw change event from the editing surface widget.
    pub fn notify_edit(&mut self, content: String, now: Instant) {
        self.editor.notify_edit(content, now);
    }

    pub fn reset_challenge(&mut self) {
        self.dispatch(Action::ResetChallenge);
    }

    pub fn clear_playground(&mut self) {
        self.dispatch(Action::ClearPlayground);
    }

    /// One scheduling tick: debounce timers, host events, load results,
    /// bus drain, then the downstream push into both adapters.
    pub fn tick(&mut self, now: Instant) {
        self.editor.tick(now);

        for action in self.sandbox.pump() {
            self.dispatch(action);
        }
        while let Ok(event) = self.load_rx.try_recv() {
            if event.generation != self.load_generation {
                tracing::debug!(
                    category = %event.category,
                    slug = %event.slug,
                    "discarding superseded load result"
                );
                continue;
            }
            let action = match event.result {
                Ok(loaded) => Action::ChallengeLoaded {
                    descriptor: loaded.descriptor,
                    scaffold: loaded.scaffold,
                },
                Err(error) => Action::ChallengeLoadFailed {
                    category: event.category,
                    slug: event.slug,
                    error,
                },
            };
            self.dispatch(action);
        }
        for action in self.bus_rx.drain() {
            self.dispatch(action);
        }

        self.editor.apply_state(self.store.state());
        self.sandbox.sync(self.store.state());
    }

    pub fn shutdown(&mut self) {
        self.editor.dispose();
        self.sandbox.dispose();
    }

    fn dispatch(&mut self, action: Action) {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            match effect {
                Effect::SyncSandbox => self.sandbox.sync(self.store.state()),
                Effect::TeardownSandbox => self.sandbox.clear(),
            }
        }
    }
}
