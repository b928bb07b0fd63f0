//! Editing surface boundary: one external editable-text widget. The
//! interface is kept narrow so the widget technology is swappable without
//! touching the store or the binding adapter.

pub type Result<T> = std::result::Result<T, EditorBindingError>;

#[derive(Debug)]
pub enum EditorBindingError {
    Teardown(String),
}

impl std::fmt::Display for EditorBindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditorBindingError::Teardown(msg) => write!(f, "Editor teardown failed: {}", msg),
        }
    }
}

impl std::error::Error for EditorBindingError {}

pub trait EditingSurface {
    /// Current buffer content.
    fn value(&self) -> String;

    /// Programmatic buffer replacement. Callers are expected to skip the
    /// call when the value already matches, to preserve cursor position and
    /// undo history.
    fn set_value(&mut self, value: &str);

    fn set_language(&mut self, language: &str);

    fn set_read_only(&mut self, read_only: bool);

    fn dispose(&mut self) -> Result<()>;
}
