use std::path::PathBuf;

use thiserror::Error;

use crate::models::Ecosystem;

/// Failures surfaced by detection and parsing.
///
/// Detection treats unreadable files as soft conditions and skips them;
/// parse failures are always surfaced, never partially swallowed.
#[derive(Debug, Error)]
pub enum ScanError {
    /// An explicitly named path does not exist.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// Ecosystem identifier outside the eight known values.
    #[error("unsupported ecosystem: {0}")]
    UnsupportedEcosystem(String),

    /// Structural decoding failure for formats requiring strict parsing.
    #[error("failed to parse {ecosystem} manifest: {source}")]
    ManifestParse {
        ecosystem: Ecosystem,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A scan completed without finding any candidate manifest.
    #[error("no supported manifest files found under {0}")]
    NoFilesDetected(PathBuf),

    /// Parsing succeeded but the manifest declares no dependencies.
    #[error("no dependencies found in {0}")]
    NoDependenciesFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Wrap a structural decode error with its ecosystem.
    pub fn manifest_parse<E>(ecosystem: Ecosystem, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ScanError::ManifestParse {
            ecosystem,
            source: Box::new(source),
        }
    }
}
