//! Per-ecosystem manifest parsers.
//!
//! Every parser is a pure transform from manifest text to an ordered list of
//! [`Dependency`] values. Only the JSON formats (npm, composer) parse
//! strictly; the rest use targeted pattern extraction.

use std::path::Path;

use crate::error::ScanError;
use crate::models::{Dependency, Ecosystem, ParsedDependencies};

pub mod cargo;
pub mod composer;
pub mod golang;
pub mod maven;
pub mod npm;
pub mod nuget;
pub mod pypi;
pub mod rubygems;

/// Sentinel version for dependencies declared without one.
pub const LATEST: &str = "latest";

/// Normalize a declared version to a single concrete string: strip the
/// leading range-operator run, cut off any `||` alternative, trim.
pub fn clean_version(raw: &str) -> String {
    let v = raw.trim();
    let v = v.trim_start_matches(['^', '~', '>', '=', '<', '!']);
    let v = match v.split_once("||") {
        Some((head, _)) => head,
        None => v,
    };
    v.trim().to_string()
}

/// Extract dependencies from manifest text for a known ecosystem.
pub fn parse_content(content: &str, ecosystem: Ecosystem) -> Result<Vec<Dependency>, ScanError> {
    match ecosystem {
        Ecosystem::Npm => npm::parse(content),
        Ecosystem::Pypi => pypi::parse(content),
        Ecosystem::Maven => maven::parse(content),
        Ecosystem::Nuget => nuget::parse(content),
        Ecosystem::Rubygems => rubygems::parse(content),
        Ecosystem::Composer => composer::parse(content),
        Ecosystem::Go => golang::parse(content),
        Ecosystem::Cargo => cargo::parse(content),
    }
}

/// Like [`parse_content`] but takes the ecosystem as a string identifier,
/// failing with `UnsupportedEcosystem` for anything outside the eight.
pub fn parse_content_str(content: &str, ecosystem: &str) -> Result<Vec<Dependency>, ScanError> {
    let ecosystem: Ecosystem = ecosystem.parse()?;
    parse_content(content, ecosystem)
}

/// Read and parse one manifest file.
pub fn parse_file(path: &Path, ecosystem: Ecosystem) -> Result<ParsedDependencies, ScanError> {
    if !path.exists() {
        return Err(ScanError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let dependencies = parse_content(&content, ecosystem)?;
    Ok(ParsedDependencies {
        ecosystem,
        dependencies,
        source_file: path.canonicalize().unwrap_or_else(|_| path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_version_strips_range_operators() {
        assert_eq!(clean_version("^4.17.21"), "4.17.21");
        assert_eq!(clean_version("~1.2.3"), "1.2.3");
        assert_eq!(clean_version(">=2.0.0"), "2.0.0");
        assert_eq!(clean_version("!=0.9"), "0.9");
        assert_eq!(clean_version("  ^1.0  "), "1.0");
    }

    #[test]
    fn test_clean_version_cuts_alternatives() {
        assert_eq!(clean_version("^1.0.0 || ^2.0.0"), "1.0.0");
        assert_eq!(clean_version("1.0||2.0"), "1.0");
    }

    #[test]
    fn test_clean_version_is_idempotent() {
        for raw in ["^4.17.21", ">=2.0.0", "1.0 || 2.0", "latest", "*", "", "~> 7.0"] {
            let once = clean_version(raw);
            assert_eq!(clean_version(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_unsupported_ecosystem_string() {
        let err = parse_content_str("{}", "unknown").unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedEcosystem(_)));
    }

    #[test]
    fn test_parse_file_missing_path() {
        let err = parse_file(Path::new("/no/such/manifest"), Ecosystem::Npm).unwrap_err();
        assert!(matches!(err, ScanError::FileNotFound(_)));
    }

    #[test]
    fn test_parse_file_reports_empty_manifests_as_empty() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{}}").unwrap();
        let parsed = parse_file(f.path(), Ecosystem::Npm).unwrap();
        assert!(parsed.dependencies.is_empty());
        assert_eq!(parsed.ecosystem, Ecosystem::Npm);
    }
}
