//! Report renderers for scan results.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects
//!   `--verbose` / `--quiet`.
//! - [`Report`] — the serializable shape behind `--report json`.

use std::path::PathBuf;

use serde::Serialize;

use crate::models::{Finding, ParsedDependencies, ProjectStructure};

pub mod terminal;

/// Everything one scan produced, as emitted by `--report json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub root: PathBuf,
    pub structure: &'a ProjectStructure,
    pub manifests: &'a [ParsedDependencies],
    pub findings: &'a [Finding],
}
