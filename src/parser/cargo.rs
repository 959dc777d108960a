use regex::Regex;

use super::clean_version;
use crate::error::ScanError;
use crate::models::Dependency;

/// Parse `Cargo.toml` text: track the current `[section]` header and match
/// `key = "version"` lines only inside `[dependencies]` or
/// `[dev-dependencies]`. Table-valued entries are out of extraction scope.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let re = Regex::new(r#"^([A-Za-z0-9_\-]+)\s*=\s*"([^"]+)""#)
        .expect("dependency pattern is valid");

    let mut deps = Vec::new();
    let mut in_dependency_section = false;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with('[') {
            in_dependency_section = line == "[dependencies]" || line == "[dev-dependencies]";
            continue;
        }
        if !in_dependency_section || line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = re.captures(line) {
            deps.push(Dependency::new(caps[1].to_string(), clean_version(&caps[2])));
        }
    }

    Ok(deps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dependency_sections() {
        let content = r#"[package]
name = "my-app"
version = "0.1.0"

[dependencies]
serde = "1.0"
regex = "^1.10"

[dev-dependencies]
tempfile = "3"

[profile.release]
lto = "fat"
"#;
        let deps = parse(content).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("serde", "1.0"),
                Dependency::new("regex", "1.10"),
                Dependency::new("tempfile", "3"),
            ]
        );
    }

    #[test]
    fn test_parse_ignores_package_metadata() {
        let content = "[package]\nname = \"app\"\nversion = \"2.0\"\n";
        assert!(parse(content).unwrap().is_empty());
    }

    #[test]
    fn test_parse_ignores_comments_inside_sections() {
        let content = "[dependencies]\n# pinned for MSRV\nanyhow = \"1.0\"\n";
        let deps = parse(content).unwrap();
        assert_eq!(deps, vec![Dependency::new("anyhow", "1.0")]);
    }
}
