pub mod catalog;
pub mod config;
pub mod editor;
pub mod loader;
pub mod local;
pub mod sandbox;
pub mod scaffold;

pub use catalog::{InMemoryCatalog, JsonCatalog};
pub use editor::EditorBinding;
pub use loader::{DescriptorLoader, LoadedChallenge};
pub use local::{BufferEditor, EditorProbe, LocalHost};
pub use sandbox::SandboxBridge;
