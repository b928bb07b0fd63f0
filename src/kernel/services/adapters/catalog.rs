//! Descriptor sources: a JSON-file-backed catalog (fetched once per process
//! lifetime, then cached) and an in-memory catalog for headless use.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::kernel::services::ports::catalog::{
    CatalogError, ChallengeDescriptor, DescriptorSource, Result,
};

/// `category -> slug -> descriptor`.
type CatalogDoc = HashMap<String, HashMap<String, ChallengeDescriptor>>;

pub struct JsonCatalog {
    path: PathBuf,
    cached: Mutex<Option<Arc<CatalogDoc>>>,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// Loads and parses the document on first use. Staleness after that
    /// point is accepted; the process must restart to pick up edits.
    fn document(&self) -> Result<Arc<CatalogDoc>> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| CatalogError::LoadFailure("catalog cache poisoned".to_string()))?;

        if let Some(doc) = cached.as_ref() {
            return Ok(Arc::clone(doc));
        }

        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::LoadFailure(format!("read {}: {}", self.path.display(), e))
        })?;
        let doc: CatalogDoc = serde_json::from_str(&text).map_err(|e| {
            CatalogError::LoadFailure(format!("parse {}: {}", self.path.display(), e))
        })?;

        tracing::info!(
            path = %self.path.display(),
            categories = doc.len(),
            "catalog document loaded"
        );

        let doc = Arc::new(doc);
        *cached = Some(Arc::clone(&doc));
        Ok(doc)
    }
}

impl DescriptorSource for JsonCatalog {
    fn fetch(&self, category: &str, slug: &str) -> Result<ChallengeDescriptor> {
        let doc = self.document()?;
        doc.get(category)
            .and_then(|slugs| slugs.get(slug))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                category: category.to_string(),
                slug: slug.to_string(),
            })
    }
}

/// Fixed descriptor set, keyed the same way as the JSON document.
pub struct InMemoryCatalog {
    doc: CatalogDoc,
}

impl InMemoryCatalog {
    pub fn new(descriptors: impl IntoIterator<Item = ChallengeDescriptor>) -> Self {
        let mut doc = CatalogDoc::default();
        for descriptor in descriptors {
            doc.entry(descriptor.category.as_str().to_string())
                .or_default()
                .insert(descriptor.slug.clone(), descriptor);
        }
        Self { doc }
    }
}

impl DescriptorSource for InMemoryCatalog {
    fn fetch(&self, category: &str, slug: &str) -> Result<ChallengeDescriptor> {
        self.doc
            .get(category)
            .and_then(|slugs| slugs.get(slug))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                category: category.to_string(),
                slug: slug.to_string(),
            })
    }
}
