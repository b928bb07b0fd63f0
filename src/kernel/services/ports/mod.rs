//! Traits and wire types for every external collaborator of the core.

pub mod catalog;
pub mod config;
pub mod editor;
pub mod runtime;
pub mod sandbox;

pub use catalog::{
    CatalogError, Category, ChallengeDescriptor, DescriptorSource, Difficulty, ValidationRules,
    WorkspaceRef,
};
pub use config::PlaygroundConfig;
pub use editor::{EditingSurface, EditorBindingError};
pub use runtime::{AsyncExecutor, BoxFuture};
pub use sandbox::{ExecutionHost, HostError, HostHandle, HostProject, HostUpdate};
