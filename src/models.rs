use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// One of the eight supported package-management conventions.
///
/// The set is closed: every ecosystem identifier in the system is one of
/// these variants, never a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Npm,
    Pypi,
    Maven,
    Nuget,
    Rubygems,
    Composer,
    Go,
    Cargo,
}

impl Ecosystem {
    /// All ecosystems, in the fixed preference order used for tie-breaking.
    pub const ALL: [Ecosystem; 8] = [
        Ecosystem::Npm,
        Ecosystem::Pypi,
        Ecosystem::Maven,
        Ecosystem::Nuget,
        Ecosystem::Rubygems,
        Ecosystem::Composer,
        Ecosystem::Go,
        Ecosystem::Cargo,
    ];

    /// Canonical lowercase identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pypi => "pypi",
            Ecosystem::Maven => "maven",
            Ecosystem::Nuget => "nuget",
            Ecosystem::Rubygems => "rubygems",
            Ecosystem::Composer => "composer",
            Ecosystem::Go => "go",
            Ecosystem::Cargo => "cargo",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "Node.js (npm)",
            Ecosystem::Pypi => "Python (PyPI)",
            Ecosystem::Maven => "Java (Maven/Gradle)",
            Ecosystem::Nuget => ".NET (NuGet)",
            Ecosystem::Rubygems => "Ruby (RubyGems)",
            Ecosystem::Composer => "PHP (Composer)",
            Ecosystem::Go => "Go modules",
            Ecosystem::Cargo => "Rust (Cargo)",
        }
    }

    /// Position in the fixed tie-break preference order.
    pub fn preference_rank(&self) -> usize {
        Self::ALL.iter().position(|e| e == self).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Ecosystem {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Ecosystem::ALL
            .iter()
            .find(|e| e.id() == lower)
            .copied()
            .ok_or_else(|| ScanError::UnsupportedEcosystem(s.to_string()))
    }
}

/// Role a detected file plays in its ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Manifest declaring direct dependencies (highest confidence).
    Primary,
    /// Lockfile pinning resolved versions.
    Lockfile,
    /// Ecosystem configuration file (lowest confidence).
    Config,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::Primary => write!(f, "primary"),
            FileType::Lockfile => write!(f, "lockfile"),
            FileType::Config => write!(f, "config"),
        }
    }
}

/// A candidate manifest found during detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedFile {
    pub path: PathBuf,
    pub ecosystem: Ecosystem,
    /// Always within `[0.0, 1.0]`; decays with search depth down to a
    /// per-type floor.
    pub confidence: f64,
    pub file_type: FileType,
}

/// One subproject of a monorepo: a directory holding a primary manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subproject {
    pub path: PathBuf,
    pub ecosystem: Ecosystem,
    /// Total detected files (all types) in this directory.
    pub file_count: usize,
}

/// Layout derived from a detection pass; recomputed each scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStructure {
    pub is_monorepo: bool,
    pub root_ecosystem: Option<Ecosystem>,
    pub subprojects: Vec<Subproject>,
}

/// A single declared dependency, version already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    /// Concrete version string, or `"latest"` when the manifest declares none.
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Result of parsing one manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDependencies {
    pub ecosystem: Ecosystem,
    /// Declaration order of the manifest; duplicates across runtime and
    /// dev sections are both included.
    pub dependencies: Vec<Dependency>,
    pub source_file: PathBuf,
}

/// A known vulnerability reported by the OSV database for one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub dependency: Dependency,
    pub ecosystem: Ecosystem,
    pub vulnerability_id: String,
    pub summary: Option<String>,
}
