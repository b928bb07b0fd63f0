use rustc_hash::{FxHashMap, FxHashSet};

use crate::kernel::services::ports::catalog::{ChallengeDescriptor, ValidationRules};

/// In-memory virtual file system: path -> content. Keys are unique and
/// order is irrelevant; no real disk I/O behind it.
pub type FileMap = FxHashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    pub language: String,
    pub theme: String,
}

/// Immutable bundle derived once per challenge load. Used both to seed the
/// sandbox and to support "reset to original"; never mutated in place.
#[derive(Debug, Clone)]
pub struct ExecutionModel {
    pub id: String,
    pub title: String,
    pub files: FileMap,
    pub default_file: String,
    pub read_only: FxHashSet<String>,
    pub editor: EditorOptions,
    pub validation: Option<ValidationRules>,
}

/// Output of scaffold generation: the initial file set plus the metadata the
/// execution model is built from. `default_file` and every read-only path are
/// guaranteed to exist as keys of `files`.
#[derive(Debug, Clone)]
pub struct Scaffold {
    pub files: FileMap,
    pub default_file: String,
    pub read_only: FxHashSet<String>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub passed: bool,
    pub missing: Vec<String>,
}

#[derive(Debug)]
pub struct PlaygroundState {
    pub descriptor: Option<ChallengeDescriptor>,
    pub model: Option<ExecutionModel>,
    pub active_file: Option<String>,
    /// Working copy of the file set, seeded from the model and divergeable
    /// from it. Mutated only through store dispatch.
    pub working: FileMap,
    pub loading: bool,
    pub host_busy: bool,
    pub host_failed: bool,
    pub load_error: Option<String>,
    pub validation: Option<ValidationOutcome>,
    /// Editor theme pushed into every execution model; survives clears.
    pub theme: String,
}

impl PlaygroundState {
    pub fn new() -> Self {
        Self::with_theme("dark")
    }

    pub fn with_theme(theme: &str) -> Self {
        Self {
            descriptor: None,
            model: None,
            active_file: None,
            working: FileMap::default(),
            loading: false,
            host_busy: false,
            host_failed: false,
            load_error: None,
            validation: None,
            theme: theme.to_string(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn active_content(&self) -> Option<&str> {
        let path = self.active_file.as_deref()?;
        self.working.get(path).map(String::as_str)
    }

    pub fn is_read_only(&self, path: &str) -> bool {
        self.model
            .as_ref()
            .map(|m| m.read_only.contains(path))
            .unwrap_or(false)
    }

    /// Paths the user may edit, sorted for stable presentation.
    pub fn editable_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .working
            .keys()
            .filter(|p| !self.is_read_only(p))
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl Default for PlaygroundState {
    fn default() -> Self {
        Self::new()
    }
}

/// Static validation of the working set against the rules the descriptor
/// declares. Pure derivation; no code is executed.
pub fn validate_working_set(
    model: &ExecutionModel,
    working: &FileMap,
) -> Option<ValidationOutcome> {
    let rules = model.validation.as_ref()?;

    let Some(content) = working.get(&rules.entry) else {
        return Some(ValidationOutcome {
            passed: false,
            missing: rules.expect.clone(),
        });
    };

    let missing: Vec<String> = rules
        .expect
        .iter()
        .filter(|needle| !content.contains(needle.as_str()))
        .cloned()
        .collect();

    Some(ValidationOutcome {
        passed: missing.is_empty(),
        missing,
    })
}
