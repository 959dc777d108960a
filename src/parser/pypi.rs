use regex::Regex;

use super::{clean_version, LATEST};
use crate::error::ScanError;
use crate::models::Dependency;

/// Parse `requirements.txt`-style text.
///
/// Blank lines, `#` comments, and `-`-prefixed option lines (`-r`, `-e`,
/// `--index-url`, ...) are skipped. A bare name without a comparator maps
/// to the `"latest"` sentinel.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let re = Regex::new(r"^([A-Za-z0-9_.\-]+)\s*(?:(?:>=|<=|==|~=|!=|>|<)\s*([^\s;,]+))?")
        .expect("requirement pattern is valid");

    let mut deps = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
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
