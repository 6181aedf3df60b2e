use serde_json::Value;

use crate::error::ExtractError;
use crate::models::{Ecosystem, Manifest, Resolved};

/// PyPI content arrives already resolved; it is decoded and passed through.
#[derive(Debug, Default)]
pub struct PypiExtractor;

impl PypiExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl super::Extractor for PypiExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pypi
    }

    fn resolve(&self, manifest: &Manifest, _include_transitive: bool) -> Result<Resolved, ExtractError> {
        let content: Value =
            serde_json::from_str(&manifest.content).map_err(|source| ExtractError::InvalidContent {
                filepath: manifest.filepath.clone(),
                source,
            })?;
        Ok(Resolved::Raw(content))
    }
}
