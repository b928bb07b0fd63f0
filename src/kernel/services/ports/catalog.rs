//! Descriptor source boundary: a read-only document keyed
//! `category -> slug -> descriptor`. Network transport and catalog
//! pagination live behind this trait; the core only ever asks for one
//! descriptor at a time.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug)]
pub enum CatalogError {
    NotFound { category: String, slug: String },
    LoadFailure(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound { category, slug } => {
                write!(f, "No descriptor for {}/{}", category, slug)
            }
            CatalogError::LoadFailure(msg) => write!(f, "Descriptor load failed: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Closed category enumeration; anything the catalog invents later lands in
/// `Other` and gets the default scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Category {
    Forms,
    DataFetching,
    Core,
    Routing,
    ReactiveState,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Forms => "forms",
            Category::DataFetching => "data-fetching",
            Category::Core => "core",
            Category::Routing => "routing",
            Category::ReactiveState => "reactive-state",
            Category::Other => "other",
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "forms" => Category::Forms,
            "data-fetching" => Category::DataFetching,
            "core" => Category::Core,
            "routing" => Category::Routing,
            "reactive-state" => Category::ReactiveState,
            _ => Category::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Unrated,
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        match value.as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Unrated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    pub path: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// File whose content the static checks run against.
    pub entry: String,
    /// Substrings the entry file must contain.
    #[serde(default)]
    pub expect: Vec<String>,
}

/// Static metadata describing one coding exercise. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDescriptor {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub category: Category,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub workspace: WorkspaceRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

pub trait DescriptorSource: Send + Sync {
    /// O(1) lookup by category and slug. `NotFound` and `LoadFailure`
    /// propagate unmodified; retry belongs to the source, not the caller.
    fn fetch(&self, category: &str, slug: &str) -> Result<ChallengeDescriptor>;
}
