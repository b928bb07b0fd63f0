use super::{Action, Effect};
use crate::kernel::state::{
    validate_working_set, EditorOptions, ExecutionModel, PlaygroundState,
};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

/// Single owner of playground state. Every mutation goes through
/// `dispatch`; there are no hidden transitions.
pub struct Store {
    state: PlaygroundState,
}

impl Store {
    pub fn new(state: PlaygroundState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &PlaygroundState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::ChallengeLoadStarted { category, slug } => {
                tracing::info!(%category, %slug, "challenge load started");
                self.state.loading = true;
                self.state.load_error = None;
                DispatchResult::changed(Vec::new())
            }
            Action::ChallengeLoaded {
                descriptor,
                scaffold,
            } => {
                tracing::info!(id = %descriptor.id, slug = %descriptor.slug, "challenge loaded");

                let model = ExecutionModel {
                    id: descriptor.id.clone(),
                    title: descriptor.title.clone(),
                    files: scaffold.files.clone(),
                    default_file: scaffold.default_file.clone(),
                    read_only: scaffold.read_only,
                    editor: EditorOptions {
                        language: scaffold.language,
                        theme: self.state.theme.clone(),
                    },
                    validation: descriptor.validation.clone(),
                };

                // Atomic replacement: either all of this lands or (on the
                // failure path above) none of it does.
                self.state.active_file = Some(scaffold.default_file);
                self.state.working = scaffold.files;
                self.state.model = Some(model);
                self.state.descriptor = Some(descriptor);
                self.state.loading = false;
                self.state.load_error = None;
                self.state.host_failed = false;
                self.state.validation = None;

                DispatchResult::changed(vec![Effect::SyncSandbox])
            }
            Action::ChallengeLoadFailed {
                category,
                slug,
                error,
            } => {
                tracing::warn!(%category, %slug, %error, "challenge load failed");
                self.state.loading = false;
                self.state.load_error = Some(error);
                DispatchResult::changed(Vec::new())
            }
            Action::UpdateFileContent { path, content } => {
                if self.state.is_read_only(&path) {
                    tracing::warn!(%path, "edit rejected: read-only file");
                    return DispatchResult::unchanged();
                }
                let Some(existing) = self.state.working.get_mut(&path) else {
                    // Stale reference, e.g. a debounced edit that outlived a
                    // challenge switch.
                    tracing::debug!(%path, "edit dropped: unknown path");
                    return DispatchResult::unchanged();
                };
                if *existing == content {
                    return DispatchResult::unchanged();
                }

                *existing = content;
                if let Some(model) = &self.state.model {
                    self.state.validation = validate_working_set(model, &self.state.working);
                }
                DispatchResult::changed(vec![Effect::SyncSandbox])
            }
            Action::SetActiveFile { path } => {
                if !self.state.working.contains_key(&path) {
                    // Guard against stale references; not an error.
                    return DispatchResult::unchanged();
                }
                if self.state.active_file.as_deref() == Some(path.as_str()) {
                    return DispatchResult::unchanged();
                }
                self.state.active_file = Some(path);
                DispatchResult::changed(Vec::new())
            }
            Action::ResetChallenge => {
                let Some(model) = &self.state.model else {
                    return DispatchResult::unchanged();
                };
                if self.state.working == model.files && self.state.validation.is_none() {
                    return DispatchResult::unchanged();
                }
                self.state.working = model.files.clone();
                self.state.validation = None;
                DispatchResult::changed(vec![Effect::SyncSandbox])
            }
            Action::ClearPlayground => {
                if self.state.descriptor.is_none()
                    && self.state.model.is_none()
                    && self.state.working.is_empty()
                    && !self.state.loading
                {
                    return DispatchResult::unchanged();
                }
                self.state = PlaygroundState::with_theme(&self.state.theme);
                DispatchResult::changed(vec![Effect::TeardownSandbox])
            }
            Action::SandboxStatus { busy, failed } => {
                if self.state.host_busy == busy && self.state.host_failed == failed {
                    return DispatchResult::unchanged();
                }
                self.state.host_busy = busy;
                self.state.host_failed = failed;
                DispatchResult::changed(Vec::new())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
