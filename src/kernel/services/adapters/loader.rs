use std::sync::Arc;

use crate::kernel::services::adapters::scaffold;
use crate::kernel::services::ports::catalog::{ChallengeDescriptor, DescriptorSource, Result};
use crate::kernel::state::Scaffold;

#[derive(Debug, Clone)]
pub struct LoadedChallenge {
    pub descriptor: ChallengeDescriptor,
    pub scaffold: Scaffold,
}

/// Fetches one descriptor and derives its initial file set. Source errors
/// propagate unmodified; scaffold generation itself cannot fail.
pub struct DescriptorLoader {
    source: Arc<dyn DescriptorSource>,
}

impl DescriptorLoader {
    pub fn new(source: Arc<dyn DescriptorSource>) -> Self {
        Self { source }
    }

    pub fn load(&self, category: &str, slug: &str) -> Result<LoadedChallenge> {
        let descriptor = self.source.fetch(category, slug)?;
        let scaffold = scaffold::generate(&descriptor);
        tracing::debug!(
            id = %descriptor.id,
            files = scaffold.files.len(),
            "descriptor loaded and scaffolded"
        );
        Ok(LoadedChallenge {
            descriptor,
            scaffold,
        })
    }
}
