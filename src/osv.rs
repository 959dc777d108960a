//! Async client for the OSV vulnerability database.
//!
//! Dependencies are submitted in `querybatch` chunks; each query carries the
//! OSV ecosystem name, package name, and concrete version. Entries with the
//! `"latest"` sentinel have no queryable version and are skipped.

use anyhow::Result;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::models::{Dependency, Ecosystem, Finding, ParsedDependencies};
use crate::parser::LATEST;

const QUERYBATCH_URL: &str = "https://api.osv.dev/v1/querybatch";
const BATCH_SIZE: usize = 100;

/// OSV's name for each supported ecosystem.
fn osv_ecosystem(ecosystem: Ecosystem) -> &'static str {
    match ecosystem {
        Ecosystem::Npm => "npm",
        Ecosystem::Pypi => "PyPI",
        Ecosystem::Maven => "Maven",
        Ecosystem::Nuget => "NuGet",
        Ecosystem::Rubygems => "RubyGems",
        Ecosystem::Composer => "Packagist",
        Ecosystem::Go => "Go",
        Ecosystem::Cargo => "crates.io",
    }
}

#[derive(Serialize)]
struct QueryBatch<'a> {
    queries: Vec<Query<'a>>,
}

#[derive(Serialize)]
struct Query<'a> {
    package: Package<'a>,
    version: &'a str,
}

#[derive(Serialize)]
struct Package<'a> {
    name: &'a str,
    ecosystem: &'static str,
}

#[derive(Deserialize)]
struct BatchResponse {
    results: Vec<QueryResult>,
}

#[derive(Deserialize, Default)]
struct QueryResult {
    #[serde(default)]
    vulns: Vec<Vuln>,
}

#[derive(Deserialize)]
struct Vuln {
    id: String,
    #[serde(default)]
    summary: Option<String>,
}

/// Flatten parsed manifests into the (ecosystem, dependency) pairs OSV can
/// answer for — anything with a concrete version.
fn queryable(manifests: &[ParsedDependencies]) -> Vec<(Ecosystem, Dependency)> {
    manifests
        .iter()
        .flat_map(|m| {
            m.dependencies
                .iter()
                .filter(|d| d.version != LATEST && !d.version.is_empty())
                .map(|d| (m.ecosystem, d.clone()))
        })
        .collect()
}

/// Query OSV for every concrete dependency across `manifests`.
pub async fn query_all(manifests: &[ParsedDependencies], quiet: bool) -> Result<Vec<Finding>> {
    let pairs = queryable(manifests);
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let pb = if !quiet {
        let pb = ProgressBar::new(pairs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let batch_futures: Vec<_> = pairs
        .chunks(BATCH_SIZE)
        .map(|batch| {
            let client = client.clone();
            async move {
                let queries = batch
                    .iter()
                    .map(|(eco, dep)| Query {
                        package: Package {
                            name: &dep.name,
                            ecosystem: osv_ecosystem(*eco),
                        },
                        version: &dep.version,
                    })
                    .collect();

                let response = client
                    .post(QUERYBATCH_URL)
                    .header("User-Agent", "depscanr/0.1.0")
                    .json(&QueryBatch { queries })
                    .send()
                    .await?;

                if !response.status().is_success() {
                    anyhow::bail!("OSV query failed with status {}", response.status());
                }
                Ok::<BatchResponse, anyhow::Error>(response.json().await?)
            }
        })
        .collect();

    let results = join_all(batch_futures).await;

    let mut findings = Vec::new();
    for (batch, result) in pairs.chunks(BATCH_SIZE).zip(results) {
        let response = result?;
        for ((ecosystem, dep), query_result) in batch.iter().zip(response.results) {
            for vuln in query_result.vulns {
                findings.push(Finding {
                    dependency: dep.clone(),
                    ecosystem: *ecosystem,
                    vulnerability_id: vuln.id,
                    summary: vuln.summary,
                });
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_osv_ecosystem_names() {
        assert_eq!(osv_ecosystem(Ecosystem::Pypi), "PyPI");
        assert_eq!(osv_ecosystem(Ecosystem::Cargo), "crates.io");
        assert_eq!(osv_ecosystem(Ecosystem::Composer), "Packagist");
    }

    #[test]
    fn test_queryable_skips_latest() {
        let manifests = vec![ParsedDependencies {
            ecosystem: Ecosystem::Pypi,
            dependencies: vec![
                Dependency::new("requests", "2.0.0"),
                Dependency::new("flask", "latest"),
            ],
            source_file: PathBuf::from("/p/requirements.txt"),
        }];
        let pairs = queryable(&manifests);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1.name, "requests");
    }

    #[test]
    fn test_query_serialization_shape() {
        let batch = QueryBatch {
            queries: vec![Query {
                package: Package {
                    name: "lodash",
                    ecosystem: "npm",
                },
                version: "4.17.21",
            }],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["queries"][0]["package"]["name"], "lodash");
        assert_eq!(json["queries"][0]["version"], "4.17.21");
    }
}
