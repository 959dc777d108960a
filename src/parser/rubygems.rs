use regex::Regex;

use super::{clean_version, LATEST};
use crate::error::ScanError;
use crate::models::Dependency;

/// Parse `Gemfile` text: `gem 'name'` lines with an optional version
/// argument, single or double quotes. A missing version maps to `"latest"`.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let re = Regex::new(r#"^\s*gem\s+['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]+)['"])?"#)
        .expect("gem pattern is valid");

    let mut deps = Vec::new();
    for line in content.lines() {
        if let Some(caps) = re.captures(line) {
            let name = caps[1].to_string();
            let version = caps
                .get(2)
                .map(|m| clean_version(m.as_str()))
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| LATEST.to_string());
            deps.push(Dependency::new(name, version));
        }
    }

    Ok(deps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gem_lines() {
        let content = r#"source 'https://rubygems.org'

gem 'rails', '7.0.4'
gem "puma", "~> 5.0"
gem 'redis'
"#;
        let deps = parse(content).unwrap();
        assert_eq!(
            deps,
            vec![
                Dependency::new("rails", "7.0.4"),
                Dependency::new("puma", "5.0"),
                Dependency::new("redis", "latest"),
            ]
        );
    }

    #[test]
    fn test_parse_ignores_non_gem_lines() {
        let content = "ruby '3.2.0'\ngroup :test do\nend\n";
        assert!(parse(content).unwrap().is_empty());
    }
}
