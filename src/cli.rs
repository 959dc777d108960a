use std::path::PathBuf;

use clap::Parser;

use crate::models::Ecosystem;

#[derive(Parser, Debug)]
#[command(
    name = "depscanr",
    about = "Detect project manifests and scan dependencies for known vulnerabilities",
    version
)]
pub struct Cli {
    /// Project path to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Scan a single explicit manifest file instead of detecting one
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Prefer this ecosystem when several manifests are detected
    #[arg(long, value_name = "ECOSYSTEM")]
    pub ecosystem: Option<EcosystemArg>,

    /// Parse every detected primary manifest, not just the best one
    #[arg(long)]
    pub all: bool,

    /// Maximum directory depth for the recursive search [default: 3]
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Query the OSV database for known vulnerabilities
    #[arg(long)]
    pub online: bool,

    /// Config file [default: ./.depscanr/config.toml, fallback ~/.config/depscanr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show every parsed dependency (not just vulnerability findings)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum EcosystemArg {
    Npm,
    Pypi,
    Maven,
    Nuget,
    Rubygems,
    Composer,
    Go,
    Cargo,
}

impl From<&EcosystemArg> for Ecosystem {
    fn from(arg: &EcosystemArg) -> Self {
        match arg {
            EcosystemArg::Npm => Ecosystem::Npm,
            EcosystemArg::Pypi => Ecosystem::Pypi,
            EcosystemArg::Maven => Ecosystem::Maven,
            EcosystemArg::Nuget => Ecosystem::Nuget,
            EcosystemArg::Rubygems => Ecosystem::Rubygems,
            EcosystemArg::Composer => Ecosystem::Composer,
            EcosystemArg::Go => Ecosystem::Go,
            EcosystemArg::Cargo => Ecosystem::Cargo,
        }
    }
}
