use serde_json::{Map, Value};

use crate::error::ExtractError;
use crate::models::{DependencyNode, Ecosystem, Manifest, Resolved};

use super::ExtractOptions;

/// Extractor for `npm list --json` style output.
///
/// The document is already a tree: each entry under `dependencies` may carry
/// its own `dependencies` (or `required.dependencies`), nested to any depth.
/// Entries keep the key order of the document.
#[derive(Debug, Default)]
pub struct NpmExtractor {
    options: ExtractOptions,
}

impl NpmExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Append every versioned entry below `deps` to `out`, pre-order.
    /// `depth` is the level of the entries in `deps`.
    fn collect_transitives(&self, deps: &Map<String, Value>, depth: usize, out: &mut Vec<DependencyNode>) {
        if self.options.max_depth.is_some_and(|limit| depth > limit) {
            return;
        }
        for (name, info) in deps {
            let Some(version) = version_of(info) else {
                continue;
            };
            out.push(DependencyNode::leaf(name.as_str(), version));
            if let Some(nested) = nested_of(info) {
                self.collect_transitives(nested, depth + 1, out);
            }
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// `version`, falling back to `required.version`.
fn version_of(info: &Value) -> Option<&str> {
    non_empty_str(info.get("version"))
        .or_else(|| non_empty_str(info.get("required").and_then(|r| r.get("version"))))
}

fn non_empty_map(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object).filter(|m| !m.is_empty())
}

/// `dependencies`, falling back to `required.dependencies`; empty maps count as absent.
fn nested_of(info: &Value) -> Option<&Map<String, Value>> {
    non_empty_map(info.get("dependencies"))
        .or_else(|| non_empty_map(info.get("required").and_then(|r| r.get("dependencies"))))
}

impl super::Extractor for NpmExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn resolve(&self, manifest: &Manifest, include_transitive: bool) -> Result<Resolved, ExtractError> {
        let document: Map<String, Value> =
            serde_json::from_str(&manifest.content).map_err(|source| ExtractError::InvalidContent {
                filepath: manifest.filepath.clone(),
                source,
            })?;

        let mut resolved = Vec::new();
        let Some(dependencies) = document.get("dependencies").and_then(Value::as_object) else {
            return Ok(Resolved::Tree(resolved));
        };

        for (name, info) in dependencies {
            let Some(version) = version_of(info) else {
                continue;
            };

            let mut deps = Vec::new();
            if include_transitive {
                if let Some(nested) = nested_of(info) {
                    self.collect_transitives(nested, 1, &mut deps);
                }
            }

            resolved.push(DependencyNode {
                package: name.clone(),
                version: version.to_string(),
                deps,
            });
        }

        Ok(Resolved::Tree(resolved))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Extractor;

    fn resolve_with(extractor: &NpmExtractor, json: &str, transitive: bool) -> Vec<DependencyNode> {
        let manifest = Manifest::new("/web/npmlist.json", "npmlist.json", json);
        match extractor.resolve(&manifest, transitive).unwrap() {
            Resolved::Tree(tree) => tree,
            other => panic!("unexpected {:?}", other),
        }
    }

    fn resolve(json: &str, transitive: bool) -> Vec<DependencyNode> {
        resolve_with(&NpmExtractor::new(), json, transitive)
    }

    const TREE: &str = r#"{
  "name": "web",
  "dependencies": {
    "express": {
      "version": "4.18.2",
      "dependencies": {
        "body-parser": {
          "version": "1.20.1",
          "dependencies": { "bytes": { "version": "3.1.2" } }
        },
        "cookie": { "version": "0.5.0" }
      }
    },
    "abbrev": {
      "required": {
        "version": "1.1.1",
        "dependencies": { "nopt": { "required": { "version": "5.0.0" } } }
      }
    },
    "missing": { "peerMissing": true }
  }
}"#;

    #[test]
    fn test_single_dependency() {
        let tree = resolve(r#"{"dependencies": {"lodash": {"version": "4.17.21"}}}"#, false);
        assert_eq!(tree, vec![DependencyNode::leaf("lodash", "4.17.21")]);
    }

    #[test]
    fn test_direct_keeps_document_order_and_skips_unversioned() {
        let tree = resolve(TREE, false);
        let names: Vec<_> = tree.iter().map(|n| (n.package.as_str(), n.version.as_str())).collect();
        assert_eq!(names, vec![("express", "4.18.2"), ("abbrev", "1.1.1")]);
        assert!(tree.iter().all(|n| n.deps.is_empty()));
    }

    #[test]
    fn test_transitives_flattened_preorder() {
        let tree = resolve(TREE, true);
        assert_eq!(
            tree[0].deps,
            vec![
                DependencyNode::leaf("body-parser", "1.20.1"),
                DependencyNode::leaf("bytes", "3.1.2"),
                DependencyNode::leaf("cookie", "0.5.0"),
            ]
        );
        assert_eq!(tree[1].deps, vec![DependencyNode::leaf("nopt", "5.0.0")]);
    }

    #[test]
    fn test_max_depth_limits_nesting() {
        let extractor = NpmExtractor::with_options(ExtractOptions { max_depth: Some(1) });
        let tree = resolve_with(&extractor, TREE, true);
        assert_eq!(
            tree[0].deps,
            vec![
                DependencyNode::leaf("body-parser", "1.20.1"),
                DependencyNode::leaf("cookie", "0.5.0"),
            ]
        );
    }

    #[test]
    fn test_missing_dependencies_key() {
        assert!(resolve(r#"{"name": "empty"}"#, true).is_empty());
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let manifest = Manifest::new("/web/npmlist.json", "npmlist.json", "not json");
        let err = NpmExtractor::new().resolve(&manifest, false).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidContent { .. }));
    }
}
