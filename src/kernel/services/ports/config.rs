use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    300
}

fn default_theme() -> String {
    "dark".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaygroundConfig {
    /// Window for coalescing editor change events into one store update.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Catalog document location for the JSON-backed descriptor source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            theme: default_theme(),
            catalog: None,
        }
    }
}
