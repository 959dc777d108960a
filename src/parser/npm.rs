use serde_json::Value;

use super::{clean_version, LATEST};
use crate::error::ScanError;
use crate::models::{Dependency, Ecosystem};

/// Parse `package.json`: the union of `dependencies` and `devDependencies`,
/// in declaration order.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ScanError::manifest_parse(Ecosystem::Npm, e))?;

    let mut deps = Vec::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(pkgs) = json.get(section).and_then(Value::as_object) {
            for (name, range) in pkgs {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cleans_range_operators() {
        let deps = parse(r#"{"dependencies":{"lodash":"^4.17.21"}}"#).unwrap();
        assert_eq!(deps, vec![Dependency::new("lodash", "4.17.21")]);
    }

    #[test]
    fn test_parse_includes_dev_dependencies_after_runtime() {
        let json = r#"{
  "dependencies": { "express": "^4.18.2", "lodash": "~4.17.21" },
  "devDependencies": { "jest": ">=29.0.0" }
}"#;
        let deps = parse(json).unwrap();
        assert_eq!(deps.len(), 3);
        assert_eq!(deps[0], Dependency::new("express", "4.18.2"));
        assert_eq!(deps[1], Dependency::new("lodash", "4.17.21"));
        assert_eq!(deps[2], Dependency::new("jest", "29.0.0"));
    }

    #[test]
    fn test_parse_versionless_entry_becomes_latest() {
        let deps = parse(r#"{"dependencies":{"linked": {}}}"#).unwrap();
        assert_eq!(deps, vec![Dependency::new("linked", "latest")]);
    }

    #[test]
    fn test_parse_invalid_json_is_a_parse_error() {
        let err = parse("{not json").unwrap_err();
        assert!(matches!(
            err,
            ScanError::ManifestParse {
                ecosystem: Ecosystem::Npm,
                ..
            }
        ));
    }
}
