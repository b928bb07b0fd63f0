use std::path::Path;

use crate::kernel::services::ports::config::PlaygroundConfig;

/// Reads the playground config document. A missing or malformed file falls
/// back to defaults with a warning; configuration is never fatal.
pub fn load_config(path: &Path) -> PlaygroundConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
            return PlaygroundConfig::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config malformed, using defaults");
            PlaygroundConfig::default()
        }
    }
}
