use std::collections::HashSet;

use tracing::debug;

use crate::coordinate::maven::MavenCoordinate;
use crate::error::ExtractError;
use crate::models::{DependencyNode, Ecosystem, Manifest, Resolved};

use super::closure::{transitive_closure, GraphEdge};
use super::ExtractOptions;

/// Extractor for Maven dependency graphs in DOT form, as written by
/// `mvn dependency:tree -DoutputType=dot`:
///
/// ```text
/// digraph "com.example:app:jar:1.0" {
///     "com.example:app:jar:1.0" -> "org.slf4j:slf4j-api:jar:1.7.36:compile" ;
///     "org.slf4j:slf4j-api:jar:1.7.36:compile" -> "junit:junit:jar:4.13.2:test" ;
///  }
/// ```
///
/// Lines without `->` open a module block; edges whose source is that module
/// are direct dependencies. `test`-scoped edges are never followed.
#[derive(Debug, Default)]
pub struct MavenExtractor {
    options: ExtractOptions,
}

impl MavenExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }
}

struct MavenEdge {
    /// Module block the edge was declared in.
    module: String,
    source: String,
    target: String,
    coordinate: MavenCoordinate,
}

impl GraphEdge for MavenEdge {
    fn source(&self) -> &str {
        &self.source
    }

    fn target(&self) -> &str {
        &self.target
    }

    fn is_followed(&self) -> bool {
        !self.coordinate.is_test_scope()
    }
}

impl MavenEdge {
    fn to_node(&self) -> DependencyNode {
        DependencyNode::leaf(self.coordinate.package(), self.coordinate.version.clone())
    }
}

/// Text between the first and last double quote, or empty.
fn module_name(line: &str) -> String {
    match (line.find('"'), line.rfind('"')) {
        (Some(start), Some(end)) if start < end => line[start + 1..end].to_string(),
        _ => String::new(),
    }
}

fn parse_edge(line: &str, module: &str) -> Result<MavenEdge, ExtractError> {
    let cleaned = line.replace('"', "").replace(" ;", "");
    let mut sides = cleaned.trim().split(" -> ");

    let (Some(source), Some(target), None) = (sides.next(), sides.next(), sides.next()) else {
        return Err(ExtractError::edge(line));
    };

    Ok(MavenEdge {
        module: module.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        coordinate: MavenCoordinate::parse(target)?,
    })
}

/// Parse every edge line, remembering the module block it belongs to.
fn parse_graph(content: &str) -> Result<Vec<MavenEdge>, ExtractError> {
    let mut module = String::new();
    let mut edges = Vec::new();

    for line in content.lines() {
        if line.contains("->") {
            edges.push(parse_edge(line, &module)?);
        } else {
            module = module_name(line);
        }
    }

    Ok(edges)
}

impl super::Extractor for MavenExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    fn resolve(&self, manifest: &Manifest, include_transitive: bool) -> Result<Resolved, ExtractError> {
        let edges = parse_graph(&manifest.content)?;
        let mut direct: HashSet<&str> = HashSet::new();
        let mut resolved = Vec::new();

        for edge in &edges {
            if edge.source != edge.module
                || edge.coordinate.is_test_scope()
                || !direct.insert(edge.target.as_str())
            {
                continue;
            }

            let deps = if include_transitive {
                transitive_closure(&edges, &edge.target, self.options.max_depth)
                    .into_iter()
                    .map(MavenEdge::to_node)
                    .collect()
            } else {
                Vec::new()
            };

            resolved.push(DependencyNode {
                package: edge.coordinate.package(),
                version: edge.coordinate.version.clone(),
                deps,
            });
        }

        debug!(
            manifest = %manifest.filepath,
            edges = edges.len(),
            direct = resolved.len(),
            "parsed maven graph"
        );

        Ok(Resolved::Tree(resolved))
    }
}
