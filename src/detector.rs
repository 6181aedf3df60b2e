use std::collections::HashMap;
use std::path::Path;

use crate::models::Ecosystem;

/// Map a manifest file to its ecosystem by name.
///
/// `overrides` (from config) is consulted first, then the graph-dump names
/// the extractors expect.
pub fn detect_ecosystem(path: &Path, overrides: &HashMap<String, Ecosystem>) -> Option<Ecosystem> {
    let name = path.file_name()?.to_str()?;

    if let Some(eco) = overrides.get(name) {
        return Some(*eco);
    }

    match name {
        "dependencies.txt" => Some(Ecosystem::Maven),
        "npmlist.json" | "npm-list.json" => Some(Ecosystem::Npm),
        "pylist.json" => Some(Ecosystem::Pypi),
        "gograph.txt" | "go-graph.txt" => Some(Ecosystem::Golang),
        _ if path.extension().is_some_and(|ext| ext == "dot") => Some(Ecosystem::Maven),
        _ => None,
    }
}
