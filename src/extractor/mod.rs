use tracing::debug;

use crate::error::ExtractError;
use crate::models::{Ecosystem, ExtractionResult, Manifest, ManifestDetail, Resolved};

pub mod closure;
pub mod golang;
pub mod maven;
pub mod npm;
pub mod pypi;

/// Tuning shared by every extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Deepest transitive level to collect. Direct dependencies are depth 0.
    /// `None` follows the graph to its end.
    pub max_depth: Option<usize>,
}

/// Turns ecosystem-native graph dumps into normalized dependency trees.
///
/// Implementors hold no per-call state, so one instance can serve any number
/// of threads.
pub trait Extractor: Send + Sync {
    fn ecosystem(&self) -> Ecosystem;

    /// Resolve the direct (and optionally transitive) dependencies of one manifest.
    fn resolve(&self, manifest: &Manifest, include_transitive: bool)
        -> Result<Resolved, ExtractError>;

    /// Resolve every manifest in order. The first failure aborts the call.
    fn extract(
        &self,
        manifests: &[Manifest],
        include_transitive: bool,
    ) -> Result<ExtractionResult, ExtractError> {
        let ecosystem = self.ecosystem();
        let mut details = Vec::with_capacity(manifests.len());

        for manifest in manifests {
            let resolved = self.resolve(manifest, include_transitive)?;
            debug!(
                %ecosystem,
                manifest = %manifest.filepath,
                direct = ?resolved.direct_count(),
                include_transitive,
                "resolved manifest"
            );
            details.push(ManifestDetail {
                ecosystem,
                manifest_file_path: manifest.filepath.clone(),
                manifest_file: manifest.filename.clone(),
                resolved,
            });
        }

        Ok(ExtractionResult::from_details(details))
    }
}

/// Build the extractor for `ecosystem`.
pub fn extractor_for(ecosystem: Ecosystem, options: ExtractOptions) -> Box<dyn Extractor> {
    match ecosystem {
        Ecosystem::Maven => Box::new(maven::MavenExtractor::with_options(options)),
        Ecosystem::Npm => Box::new(npm::NpmExtractor::with_options(options)),
        Ecosystem::Pypi => Box::new(pypi::PypiExtractor::new()),
        Ecosystem::Golang => Box::new(golang::GolangExtractor::with_options(options)),
    }
}

/// Extract `manifests` with the extractor matching `ecosystem`.
pub fn extract(
    ecosystem: Ecosystem,
    manifests: &[Manifest],
    include_transitive: bool,
    options: ExtractOptions,
) -> Result<ExtractionResult, ExtractError> {
    extractor_for(ecosystem, options).extract(manifests, include_transitive)
}
