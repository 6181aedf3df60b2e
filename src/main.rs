//! `deptree` — extract normalized dependency trees from graph dumps.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`deptree::config::load_config`]).
//! 3. Read each manifest and detect its ecosystem ([`deptree::detector`]).
//! 4. Run one extraction per ecosystem group ([`deptree::extractor::extract`]).
//! 5. Render the merged result as JSON or a terminal report ([`report`]).

mod cli;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

use cli::{Cli, ReportFormat};
use deptree::config::{load_config, Config};
use deptree::detector::detect_ecosystem;
use deptree::extractor::extract;
use deptree::models::{Ecosystem, ExtractionResult, Manifest};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd, cli.config.as_deref())?;

    let forced = cli.ecosystem.map(Ecosystem::from);
    let groups = read_manifests(&cli.manifests, forced, &config)?;

    let include_transitive = include_transitive(&cli, &config);
    let mut options = config.extract_options();
    if cli.max_depth.is_some() {
        options.max_depth = cli.max_depth;
    }
    info!(include_transitive, max_depth = ?options.max_depth, "extracting");

    let mut merged = ExtractionResult::default();
    for (ecosystem, manifests) in &groups {
        let result = extract(*ecosystem, manifests, include_transitive, options)
            .with_context(|| format!("{} extraction failed", ecosystem))?;
        merged.merge(result);
    }

    match cli.report {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&merged)?),
        ReportFormat::Terminal => report::terminal::render(&merged, cli.verbose, cli.quiet)?,
    }

    Ok(())
}

/// `--transitive` / `--no-transitive` win over `[extract] transitive`.
fn include_transitive(cli: &Cli, config: &Config) -> bool {
    if cli.no_transitive {
        false
    } else {
        cli.transitive || config.extract.transitive
    }
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("deptree={}", level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Read manifests from disk and group them by ecosystem, in first-seen order.
fn read_manifests(
    paths: &[PathBuf],
    forced: Option<Ecosystem>,
    config: &Config,
) -> Result<Vec<(Ecosystem, Vec<Manifest>)>> {
    let mut groups: Vec<(Ecosystem, Vec<Manifest>)> = Vec::new();

    for path in paths {
        let ecosystem = forced
            .or_else(|| detect_ecosystem(path, &config.detect.filenames))
            .ok_or_else(|| {
                anyhow!(
                    "cannot tell the ecosystem of {}; pass --ecosystem or map it under [detect.filenames]",
                    path.display()
                )
            })?;

        let manifest = read_manifest(path)?;
        debug!(path = %path.display(), %ecosystem, "read manifest");

        match groups.iter_mut().find(|(eco, _)| *eco == ecosystem) {
            Some((_, manifests)) => manifests.push(manifest),
            None => groups.push((ecosystem, vec![manifest])),
        }
    }

    Ok(groups)
}

fn read_manifest(path: &Path) -> Result<Manifest> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Manifest::from_bytes(path.display().to_string(), filename, bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_transitive_overrides_config() {
        let config: Config = toml::from_str("[extract]\ntransitive = true\n").unwrap();

        let cli = Cli::try_parse_from(["deptree", "gograph.txt"]).unwrap();
        assert!(include_transitive(&cli, &config));

        let cli = Cli::try_parse_from(["deptree", "gograph.txt", "--no-transitive"]).unwrap();
        assert!(!include_transitive(&cli, &config));

        let cli = Cli::try_parse_from(["deptree", "gograph.txt", "-t"]).unwrap();
        assert!(include_transitive(&cli, &Config::default()));
    }

    #[test]
    fn test_read_manifests_groups_by_ecosystem() {
        let dir = TempDir::new().unwrap();
        let go = dir.path().join("gograph.txt");
        let npm = dir.path().join("npmlist.json");
        let go2 = dir.path().join("go-graph.txt");
        std::fs::write(&go, "app dep@v1.0.0\n").unwrap();
        std::fs::write(&npm, "{}").unwrap();
        std::fs::write(&go2, "app other@v2.0.0\n").unwrap();

        let groups = read_manifests(&[go, npm, go2], None, &Config::default()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Ecosystem::Golang);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[0].1[1].filename, "go-graph.txt");
        assert_eq!(groups[1].0, Ecosystem::Npm);
    }

    #[test]
    fn test_unknown_file_needs_forced_ecosystem() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("graph.out");
        std::fs::write(&path, "app dep@v1.0.0\n").unwrap();

        assert!(read_manifests(&[path.clone()], None, &Config::default()).is_err());
        let groups = read_manifests(&[path], Some(Ecosystem::Golang), &Config::default()).unwrap();
        assert_eq!(groups[0].0, Ecosystem::Golang);
    }

    #[test]
    fn test_end_to_end_extraction_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dependencies.txt");
        std::fs::write(
            &path,
            "digraph \"a:b:jar:1.0\" {\n\t\"a:b:jar:1.0\" -> \"c:d:jar:2.0:compile\" ;\n\t\"c:d:jar:2.0:compile\" -> \"e:f:jar:3.0:runtime\" ;\n }\n",
        )
        .unwrap();

        let groups = read_manifests(&[path], None, &Config::default()).unwrap();
        let (ecosystem, manifests) = &groups[0];
        let result = extract(*ecosystem, manifests, true, Default::default()).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        let resolved = &json["result"][0]["details"][0]["resolved"];
        assert_eq!(resolved[0]["package"], "c:d");
        assert_eq!(resolved[0]["deps"][0]["package"], "e:f");
        assert_eq!(resolved[0]["deps"][0]["version"], "3.0");
    }
}
