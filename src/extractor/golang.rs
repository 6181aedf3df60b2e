use std::collections::HashSet;

use tracing::debug;

use crate::coordinate::golang::GoCoordinate;
use crate::error::ExtractError;
use crate::models::{Ecosystem, GoModuleNode, Manifest, Resolved};

use super::closure::{transitive_closure, GraphEdge};
use super::ExtractOptions;

/// Extractor for `go mod graph` output.
///
/// Each line is `source target`, both `module@version` tokens except for the
/// main module, which has no `@`. Edges leaving the main module are direct
/// dependencies; everything reachable from them is transitive.
#[derive(Debug, Default)]
pub struct GolangExtractor {
    options: ExtractOptions,
}

impl GolangExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }
}

struct GoEdge<'a> {
    source: &'a str,
    target: &'a str,
}

impl GraphEdge for GoEdge<'_> {
    fn source(&self) -> &str {
        self.source
    }

    fn target(&self) -> &str {
        self.target
    }
}

/// Split graph text into edges. The final newline is dropped; text that is
/// blank after that is an error.
fn parse_graph<'a>(manifest: &'a Manifest) -> Result<Vec<GoEdge<'a>>, ExtractError> {
    let text = manifest.content.as_str();
    let text = text.strip_suffix('\n').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(ExtractError::EmptyManifest {
            filepath: manifest.filepath.clone(),
        });
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut tokens = line.split(' ');
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(source), Some(target), None) => Ok(GoEdge { source, target }),
                _ => Err(ExtractError::edge(line)),
            }
        })
        .collect()
}

impl super::Extractor for GolangExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Golang
    }

    fn resolve(&self, manifest: &Manifest, include_transitive: bool) -> Result<Resolved, ExtractError> {
        let edges = parse_graph(manifest)?;
        let mut direct: HashSet<&str> = HashSet::new();
        let mut resolved = Vec::new();

        for edge in &edges {
            if edge.source.contains('@') || !direct.insert(edge.target) {
                continue;
            }

            let mut node = GoModuleNode::from(GoCoordinate::parse(edge.target)?);
            if include_transitive {
                node.deps = transitive_closure(&edges, edge.target, self.options.max_depth)
                    .into_iter()
                    .map(|e| GoCoordinate::parse(e.target).map(GoModuleNode::from))
                    .collect::<Result<_, _>>()?;
            }
            resolved.push(node);
        }

        debug!(
            manifest = %manifest.filepath,
            edges = edges.len(),
            direct = resolved.len(),
            "parsed go module graph"
        );

        Ok(Resolved::Modules(resolved))
    }
}
