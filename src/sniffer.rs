use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Ecosystem, FileType};

/// Fixed confidence assigned to any content-signature match. Sniffed
/// classifications never decay with depth.
pub const SNIFF_CONFIDENCE: f64 = 0.8;

struct Signature {
    ecosystem: Ecosystem,
    pattern: &'static str,
}

/// Ordered signature list. The first match wins, so the structurally
/// narrow formats (XML tags, TOML section headers) sit ahead of the broad
/// JSON and line-oriented ones.
const SIGNATURES: &[Signature] = &[
    Signature {
        ecosystem: Ecosystem::Maven,
        pattern: r"<groupId>[^<]+</groupId>|<artifactId>[^<]+</artifactId>",
    },
    Signature {
        ecosystem: Ecosystem::Nuget,
        pattern: r#"<PackageReference\s|<package\s+id="#,
    },
    Signature {
        ecosystem: Ecosystem::Cargo,
        pattern: r"(?m)^\s*\[dependencies\]",
    },
    Signature {
        ecosystem: Ecosystem::Go,
        pattern: r"(?m)^module\s+\S+|^require\s+(\(|\S+\s+v)|^go\s+1\.\d+",
    },
    Signature {
        ecosystem: Ecosystem::Rubygems,
        pattern: r#"(?m)^\s*gem\s+['"]"#,
    },
    Signature {
        ecosystem: Ecosystem::Composer,
        pattern: r#""require"\s*:\s*\{"#,
    },
    Signature {
        ecosystem: Ecosystem::Npm,
        pattern: r#""dependencies"\s*:\s*\{|"devDependencies"\s*:\s*\{"#,
    },
    Signature {
        ecosystem: Ecosystem::Pypi,
        pattern: r"(?m)^[A-Za-z0-9_.\-]+\s*(==|>=|<=|~=|!=)\s*\S+",
    },
];

/// Signatures compiled once at first use.
fn compiled_signatures() -> &'static [(Ecosystem, Regex)] {
    static COMPILED: OnceLock<Vec<(Ecosystem, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        SIGNATURES
            .iter()
            .map(|sig| {
                (
                    sig.ecosystem,
                    Regex::new(sig.pattern).expect("signature pattern is valid"),
                )
            })
            .collect()
    })
}

/// Fallback classifier for files whose name matches no registry entry.
pub struct ContentSniffer;

impl ContentSniffer {
    /// Test `content` against each signature in priority order and return
    /// the first hit. `None` is a normal outcome, not a failure.
    pub fn sniff(content: &str) -> Option<(Ecosystem, f64, FileType)> {
        for (ecosystem, re) in compiled_signatures() {
            if re.is_match(content) {
                return Some((*ecosystem, SNIFF_CONFIDENCE, FileType::Primary));
            }
        }
        None
    }
}
