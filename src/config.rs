use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::extractor::ExtractOptions;
use crate::models::Ecosystem;

/// Root configuration structure, deserialized from `.deptree/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Extraction defaults.
    #[serde(default)]
    pub extract: ExtractConfig,
    /// Manifest detection rules.
    #[serde(default)]
    pub detect: DetectConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtractConfig {
    /// Follow transitive edges when the CLI does not say otherwise.
    #[serde(default)]
    pub transitive: bool,
    /// Deepest transitive level collected; unbounded when absent.
    pub max_depth: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetectConfig {
    /// Extra manifest file names, e.g. `"mvn-graph.dot" = "maven"`.
    /// Checked before the built-in names.
    #[serde(default)]
    pub filenames: HashMap<String, Ecosystem>,
}

impl Config {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_depth: self.extract.max_depth,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.deptree/config.toml`
/// 3. `~/.config/deptree/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".deptree").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("deptree").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}
