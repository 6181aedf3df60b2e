use std::path::PathBuf;

use clap::Parser;

use deptree::models::Ecosystem;

#[derive(Parser, Debug)]
#[command(
    name = "deptree",
    about = "Extract normalized dependency trees from Maven, npm, PyPI and Go graph dumps",
    version
)]
pub struct Cli {
    /// Graph dump files to read (dependencies.txt, npmlist.json, pylist.json, gograph.txt)
    #[arg(required = true, value_name = "MANIFEST")]
    pub manifests: Vec<PathBuf>,

    /// Treat every input as this ecosystem instead of detecting it from the file name
    #[arg(long, value_name = "ECOSYSTEM")]
    pub ecosystem: Option<EcosystemArg>,

    /// Include transitive dependencies [default: from config, else off]
    #[arg(short, long, conflicts_with = "no_transitive")]
    pub transitive: bool,

    /// Direct dependencies only, even when the config turns transitives on
    #[arg(long)]
    pub no_transitive: bool,

    /// Deepest transitive level to collect (direct dependencies are depth 0)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Config file [default: ./.deptree/config.toml, fallback ~/.config/deptree/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show transitive dependencies in the terminal report
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum EcosystemArg {
    Maven,
    Npm,
    Pypi,
    Golang,
}

impl From<EcosystemArg> for Ecosystem {
    fn from(arg: EcosystemArg) -> Self {
        match arg {
            EcosystemArg::Maven => Ecosystem::Maven,
            EcosystemArg::Npm => Ecosystem::Npm,
            EcosystemArg::Pypi => Ecosystem::Pypi,
            EcosystemArg::Golang => Ecosystem::Golang,
        }
    }
}
