use super::clean_version;
use crate::error::ScanError;
use crate::models::Dependency;

/// Parse `go.mod` text: `require name version` lines, standalone or inside
/// a parenthesized `require ( ... )` block. `// indirect` trailers and
/// other comments are cut before tokenizing.
pub fn parse(content: &str) -> Result<Vec<Dependency>, ScanError> {
    let mut deps = Vec::new();
    let mut in_block = false;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with("require (") {
            in_block = true;
            continue;
        }
        if in_block && line.starts_with(')') {
            in_block = false;
            continue;
        }

        let candidate = if in_block {
            line
        } else if let Some(rest) = line.strip_prefix("require ") {
            rest
        } else {
            continue;
        };

        let candidate = candidate.split("//").next().unwrap_or("").trim();
        let mut tokens = candidate.split_whitespace();
        if let (Some(name), Some(version)) = (tokens.next(), tokens.next()) {
            deps.push(Dependency::new(name, clean_version(version)));
        }
    }

    Ok(deps)
}
