//! `depscanr` — detect dependency manifests, extract dependencies, and check
//! them against the OSV vulnerability database.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load scan config ([`config::load_config`]).
//! 3. Detect candidate manifests ([`detector`], ranked by confidence).
//! 4. Pick the best manifest — or all primaries with `--all` ([`Detector::best_file`]).
//! 5. Parse each manifest into normalized dependencies ([`parser`]).
//! 6. Optionally query OSV (`--online`, [`osv`]).
//! 7. Render the requested report ([`report`]).
//! 8. Exit `0` (clean) or `1` (vulnerabilities found, or nothing to scan).

mod cli;
mod config;
mod detector;
mod ecosystems;
mod error;
mod models;
mod osv;
mod parser;
mod report;
mod sniffer;
mod walker;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};
use config::load_config;
use detector::Detector;
use error::ScanError;
use models::{DetectedFile, Ecosystem, FileType};
use walker::FileSystemWalker;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;
    let max_depth = cli.max_depth.unwrap_or(config.scan.max_depth);

    let walker = FileSystemWalker::with_ignores(config.scan.ignore.clone());
    let detector = Detector::with_walker(&path, max_depth, walker);

    // Candidate list: an explicit --file short-circuits detection
    let files: Vec<DetectedFile> = match &cli.file {
        Some(file) => match detector.detect_file(file)? {
            Some(detected) => vec![detected],
            None => {
                eprintln!(
                    "{} is not a recognized manifest (filename and content both unmatched)",
                    file.display()
                );
                std::process::exit(1);
            }
        },
        None => detector.detect_files(),
    };

    if files.is_empty() {
        return Err(ScanError::NoFilesDetected(path).into());
    }

    let structure = detector.project_structure(&files);
    if structure.is_monorepo && !cli.quiet {
        eprintln!(
            "  {} monorepo layout: {} subprojects",
            "→".cyan(),
            structure.subprojects.len()
        );
    }

    let hint: Option<Ecosystem> = cli.ecosystem.as_ref().map(Into::into);
    let targets: Vec<DetectedFile> = if cli.all {
        let primaries: Vec<DetectedFile> = files
            .iter()
            .filter(|f| f.file_type == FileType::Primary)
            .filter(|f| hint.map_or(true, |h| f.ecosystem == h))
            .cloned()
            .collect();
        if primaries.is_empty() {
            Detector::best_file(&files, hint).into_iter().collect()
        } else {
            primaries
        }
    } else {
        Detector::best_file(&files, hint).into_iter().collect()
    };

    let mut manifests = Vec::new();
    for target in &targets {
        let parsed = parser::parse_file(&target.path, target.ecosystem)?;
        if !cli.quiet {
            eprintln!(
                "  {} {} {} dependencies",
                "→".cyan(),
                parsed.ecosystem,
                parsed.dependencies.len()
            );
        }
        manifests.push(parsed);
    }

    let total: usize = manifests.iter().map(|m| m.dependencies.len()).sum();
    if total == 0 {
        return Err(ScanError::NoDependenciesFound(targets[0].path.clone()).into());
    }

    let findings = if cli.online {
        osv::query_all(&manifests, cli.quiet).await?
    } else {
        Vec::new()
    };

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&manifests, &structure, &findings, &path, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            let report = report::Report {
                root: path.clone(),
                structure: &structure,
                manifests: &manifests,
                findings: &findings,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if !findings.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
