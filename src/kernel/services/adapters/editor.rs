//! Editing surface binding: bridges one widget to the store's active-file
//! slice. Downstream writes are value-compared to avoid redundant redraws;
//! upstream edits are debounced into single store updates; a transient
//! "applying remote value" flag breaks the feedback loop between the two.

use std::time::{Duration, Instant};

use crate::kernel::services::bus::ActionSender;
use crate::kernel::services::ports::editor::EditingSurface;
use crate::kernel::state::PlaygroundState;
use crate::kernel::Action;

struct PendingEdit {
    path: String,
    content: String,
    deadline: Instant,
}

pub struct EditorBinding {
    widget: Box<dyn EditingSurface>,
    bus: ActionSender,
    debounce: Duration,
    bound_path: Option<String>,
    language: Option<String>,
    read_only: Option<bool>,
    /// Set while a programmatic value write may still echo back through the
    /// widget's change notification; cleared on the next tick, not
    /// synchronously, because some widgets notify asynchronously.
    applying_remote: bool,
    pending: Option<PendingEdit>,
    disposed: bool,
}

impl EditorBinding {
    pub fn new(widget: Box<dyn EditingSurface>, bus: ActionSender, debounce: Duration) -> Self {
        Self {
            widget,
            bus,
            debounce,
            bound_path: None,
            language: None,
            read_only: None,
            applying_remote: false,
            pending: None,
            disposed: false,
        }
    }

    pub fn bound_path(&self) -> Option<&str> {
        self.bound_path.as_deref()
    }

    /// Downstream sync: push active path/content, language and read-only
    /// mode down to the widget whenever their derived values changed.
    pub fn apply_state(&mut self, state: &PlaygroundState) {
        if self.disposed {
            return;
        }

        let Some(path) = state.active_file.clone() else {
            if self.bound_path.take().is_some() {
                self.write_value("");
            }
            return;
        };

        if self.bound_path.as_deref() != Some(path.as_str()) {
            // Switching files; an edit still pending for the old path must
            // not be lost to the debounce window.
            self.flush();
            self.bound_path = Some(path.clone());
        }

        if let Some(model) = &state.model {
            if self.language.as_deref() != Some(model.editor.language.as_str()) {
                self.widget.set_language(&model.editor.language);
                self.language = Some(model.editor.language.clone());
            }
        }
        let read_only = state.is_read_only(&path);
        if self.read_only != Some(read_only) {
            self.widget.set_read_only(read_only);
            self.read_only = Some(read_only);
        }

        if let Some(content) = state.working.get(&path) {
            // Exact comparison against the widget's current buffer keeps
            // cursor position and undo history intact.
            if self.widget.value() != *content {
                self.write_value(content);
            }
        }
    }

    /// Upstream path: raw change events from the widget. Coalesced by the
    /// debounce window into one `UpdateFileContent` carrying final content.
    pub fn notify_edit(&mut self, content: String, now: Instant) {
        if self.disposed {
            return;
        }
        if self.applying_remote {
            // Echo of our own programmatic write; suppress re-emission.
            return;
        }
        let Some(path) = self.bound_path.clone() else {
            return;
        };
        self.pending = Some(PendingEdit {
            path,
            content,
            deadline: now + self.debounce,
        });
    }

    /// Scheduling tick: clears the loop-suppression flag and emits a
    /// pending edit whose debounce window has elapsed.
    pub fn tick(&mut self, now: Instant) {
        self.applying_remote = false;

        let due = self
            .pending
            .as_ref()
            .map(|p| p.deadline <= now)
            .unwrap_or(false);
        if due {
            self.flush();
        }
    }

    /// Emits the pending edit immediately, ignoring the deadline.
    pub fn flush(&mut self) {
        if let Some(edit) = self.pending.take() {
            let _ = self.bus.send(Action::UpdateFileContent {
                path: edit.path,
                content: edit.content,
            });
        }
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.pending = None;
        if let Err(e) = self.widget.dispose() {
            // Best-effort cleanup; teardown errors are swallowed.
            tracing::debug!(error = %e, "editor widget dispose failed");
        }
    }

    fn write_value(&mut self, value: &str) {
        self.applying_remote = true;
        self.widget.set_value(value);
    }
}

impl Drop for EditorBinding {
    fn drop(&mut self) {
        self.dispose();
    }
}
