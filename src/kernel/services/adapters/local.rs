//! In-process host and editor implementations. They back the headless demo
//! binary and the deterministic tests; no real sandbox or widget involved.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::kernel::services::ports::editor::{
    EditingSurface, EditorBindingError, Result as EditorResult,
};
use crate::kernel::services::ports::sandbox::{
    ExecutionHost, HostError, HostHandle, HostProject, HostUpdate, Result as HostResult,
};
use crate::kernel::state::FileMap;

#[derive(Default)]
struct LocalHostInner {
    next_handle: u64,
    projects: FxHashMap<u64, FileMap>,
    init_count: usize,
    apply_count: usize,
}

/// Execution host that keeps project state in memory. Failure injection
/// flags let tests exercise the bridge's error paths.
#[derive(Default)]
pub struct LocalHost {
    inner: Mutex<LocalHostInner>,
    fail_init: AtomicBool,
    fail_apply: AtomicBool,
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_init(&self) {
        self.fail_init.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_apply(&self) {
        self.fail_apply.store(true, Ordering::SeqCst);
    }

    pub fn files(&self, handle: &HostHandle) -> Option<FileMap> {
        self.inner.lock().unwrap().projects.get(&handle.0).cloned()
    }

    pub fn instance_count(&self) -> usize {
        self.inner.lock().unwrap().projects.len()
    }

    pub fn init_count(&self) -> usize {
        self.inner.lock().unwrap().init_count
    }

    pub fn apply_count(&self) -> usize {
        self.inner.lock().unwrap().apply_count
    }
}

impl ExecutionHost for LocalHost {
    fn initialize(&self, project: HostProject) -> HostResult<HostHandle> {
        if self.fail_init.swap(false, Ordering::SeqCst) {
            return Err(HostError::Init("injected init failure".to_string()));
        }
        let mut inner = self.inner.lock().unwrap();
        inner.next_handle += 1;
        let id = inner.next_handle;
        inner.init_count += 1;
        inner.projects.insert(id, project.files);
        tracing::debug!(handle = id, open_file = %project.open_file, "local host initialized");
        Ok(HostHandle(id))
    }

    fn apply(&self, handle: &HostHandle, update: HostUpdate) -> HostResult<()> {
        if self.fail_apply.swap(false, Ordering::SeqCst) {
            return Err(HostError::Apply("injected apply failure".to_string()));
        }
        let mut inner = self.inner.lock().unwrap();
        inner.apply_count += 1;
        let files = inner
            .projects
            .get_mut(&handle.0)
            .ok_or_else(|| HostError::Apply(format!("unknown handle {}", handle.0)))?;
        for (path, content) in update.create {
            files.insert(path, content);
        }
        for path in update.destroy {
            files.remove(&path);
        }
        Ok(())
    }

    fn teardown(&self, handle: HostHandle) {
        let mut inner = self.inner.lock().unwrap();
        inner.projects.remove(&handle.0);
    }
}

#[derive(Default)]
pub struct EditorProbeState {
    pub set_value_calls: usize,
    pub language: Option<String>,
    pub read_only: Option<bool>,
    pub disposed: bool,
}

pub type EditorProbe = Arc<Mutex<EditorProbeState>>;

/// Editing surface backed by a plain string buffer.
pub struct BufferEditor {
    buffer: String,
    probe: EditorProbe,
}

impl BufferEditor {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            probe: Arc::new(Mutex::new(EditorProbeState::default())),
        }
    }

    /// Returns the editor plus a shared probe recording widget calls.
    pub fn with_probe() -> (Self, EditorProbe) {
        let editor = Self::new();
        let probe = Arc::clone(&editor.probe);
        (editor, probe)
    }
}

impl Default for BufferEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl EditingSurface for BufferEditor {
    fn value(&self) -> String {
        self.buffer.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.probe.lock().unwrap().set_value_calls += 1;
    }

    fn set_language(&mut self, language: &str) {
        self.probe.lock().unwrap().language = Some(language.to_string());
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.probe.lock().unwrap().read_only = Some(read_only);
    }

    fn dispose(&mut self) -> EditorResult<()> {
        let mut probe = self.probe.lock().unwrap();
        if probe.disposed {
            return Err(EditorBindingError::Teardown(
                "already disposed".to_string(),
            ));
        }
        probe.disposed = true;
        Ok(())
    }
}
