use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coordinate::golang::GoCoordinate;
use crate::error::ExtractError;

/// One input unit: a manifest or graph dump supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub filepath: String,
    pub filename: String,
    pub content: String,
}

impl Manifest {
    pub fn new(
        filepath: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            filepath: filepath.into(),
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Build a manifest from raw bytes, which must be UTF-8.
    pub fn from_bytes(
        filepath: impl Into<String>,
        filename: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<Self, ExtractError> {
        let filepath = filepath.into();
        let content = String::from_utf8(content).map_err(|source| {
            ExtractError::InvalidEncoding {
                filepath: filepath.clone(),
                source,
            }
        })?;
        Ok(Self {
            filepath,
            filename: filename.into(),
            content,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Maven,
    Npm,
    Pypi,
    Golang,
}

impl Ecosystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Maven => "maven",
            Ecosystem::Npm => "npm",
            Ecosystem::Pypi => "pypi",
            Ecosystem::Golang => "golang",
        }
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maven" => Ok(Ecosystem::Maven),
            "npm" => Ok(Ecosystem::Npm),
            "pypi" => Ok(Ecosystem::Pypi),
            "golang" | "go" => Ok(Ecosystem::Golang),
            other => Err(format!("unknown ecosystem `{}`", other)),
        }
    }
}

/// A resolved Maven or npm dependency.
///
/// `package` is `group:artifact` for Maven and the package name for npm.
/// For direct entries `deps` holds the flattened transitive closure; nodes
/// inside `deps` are always leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub package: String,
    pub version: String,
    #[serde(default)]
    pub deps: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn leaf(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            deps: Vec::new(),
        }
    }
}

/// A resolved Go module, carrying both the raw and the cleaned version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoModuleNode {
    #[serde(flatten)]
    pub coordinate: GoCoordinate,
    #[serde(default)]
    pub deps: Vec<GoModuleNode>,
}

impl From<GoCoordinate> for GoModuleNode {
    fn from(coordinate: GoCoordinate) -> Self {
        Self {
            coordinate,
            deps: Vec::new(),
        }
    }
}

/// The `resolved` payload of one manifest. Its shape depends on the ecosystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resolved {
    Modules(Vec<GoModuleNode>),
    Tree(Vec<DependencyNode>),
    /// PyPI content, passed through as decoded.
    Raw(Value),
}

impl Resolved {
    /// Number of direct entries, or `None` for pass-through content.
    pub fn direct_count(&self) -> Option<usize> {
        match self {
            Resolved::Modules(m) => Some(m.len()),
            Resolved::Tree(t) => Some(t.len()),
            Resolved::Raw(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDetail {
    pub ecosystem: Ecosystem,
    pub manifest_file_path: String,
    pub manifest_file: String,
    #[serde(alias = "_resolved")]
    pub resolved: Resolved,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub details: Vec<ManifestDetail>,
}

/// Output of one extraction: `result[0].details[i].resolved`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub result: Vec<ResultEntry>,
}

impl ExtractionResult {
    pub fn from_details(details: Vec<ManifestDetail>) -> Self {
        Self {
            result: vec![ResultEntry { details }],
        }
    }

    pub fn details(&self) -> impl Iterator<Item = &ManifestDetail> {
        self.result.iter().flat_map(|entry| entry.details.iter())
    }

    /// Append the details of `other`, keeping a single result entry.
    pub fn merge(&mut self, other: ExtractionResult) {
        let incoming: Vec<ManifestDetail> = other
            .result
            .into_iter()
            .flat_map(|entry| entry.details)
            .collect();
        match self.result.first_mut() {
            Some(entry) => entry.details.extend(incoming),
            None => self.result.push(ResultEntry { details: incoming }),
        }
    }
}
