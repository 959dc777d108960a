use serde_json::Value;

use super::{clean_version, LATEST};
use crate::error::ScanError;
use crate::models::{Dependency, Ecosystem};

/// Parse `composer.json`: the union of `require` and `require-dev`.
///
/// The literal `"php"` entry is a language-runtime constraint, not a
/// package, and is dropped. `ext-*` extension entries are kept.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ScanError::manifest_parse(Ecosystem::Composer, e))?;

    let mut deps = Vec::new();
    for section in ["require", "require-dev"] {
        if let Some(pkgs) = json.get(section).and_then(Value::as_object) {
            for (name, range) in pkgs {
                if name == "php" {
                    continue;
                }
                let version = range
                    .as_str()
                    .map(clean_version)
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| LATEST.to_string());
                deps.push(Dependency::new(name.clone(), version));
            }
        }
    }

    Ok(deps)
}
