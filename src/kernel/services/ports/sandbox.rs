//! Execution host boundary: an isolated environment that runs the user's
//! edited code. Modeled as an opaque external actor; calls may block for
//! seconds and are run on the executor, never on the dispatch thread.

use crate::kernel::state::FileMap;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug)]
pub enum HostError {
    Init(String),
    Apply(String),
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostError::Init(msg) => write!(f, "Host init failed: {}", msg),
            HostError::Apply(msg) => write!(f, "Host apply failed: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

/// Opaque reference to one sandboxed instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostHandle(pub u64);

/// Full project sent on (re)initialization.
#[derive(Debug, Clone)]
pub struct HostProject {
    pub files: FileMap,
    pub open_file: String,
    pub theme: String,
}

/// Incremental update. Content replacement goes through `create`: the host
/// has no distinct replace primitive, creation and replacement share the
/// same underlying call.
#[derive(Debug, Clone)]
pub struct HostUpdate {
    pub create: FileMap,
    pub destroy: Vec<String>,
}

pub trait ExecutionHost: Send + Sync {
    fn initialize(&self, project: HostProject) -> Result<HostHandle>;

    fn apply(&self, handle: &HostHandle, update: HostUpdate) -> Result<()>;

    /// Best-effort; hosts without an explicit dispose API just clear their
    /// mount surface.
    fn teardown(&self, handle: HostHandle);
}
