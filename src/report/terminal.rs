use std::path::Path;

use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::{Finding, ParsedDependencies, ProjectStructure};

/// Render a colored terminal report.
pub fn render(
    manifests: &[ParsedDependencies],
    structure: &ProjectStructure,
    findings: &[Finding],
    path: &Path,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let total_deps: usize = manifests.iter().map(|m| m.dependencies.len()).sum();

    if quiet {
        println!(
            "Manifests: {}  Dependencies: {}  Vulnerabilities: {}",
            manifests.len(),
            total_deps,
            if findings.is_empty() {
                findings.len().to_string().green()
            } else {
                findings.len().to_string().red()
            },
        );
        return Ok(());
    }

    println!("\n {} v{}", "depscanr".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Scanning: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Manifests parsed   : {}", manifests.len()));
    println!(" │  {:<48} │", format!("Dependencies       : {}", total_deps));
    println!(
        " │  {:<48} │",
        format!(
            "{}  Vulnerabilities : {:>4}",
            if findings.is_empty() {
                "✓".green()
            } else {
                "✗".red()
            },
            findings.len()
        )
    );
    if structure.is_monorepo {
        println!(
            " │  {:<48} │",
            format!("Monorepo           : {} subprojects", structure.subprojects.len())
        );
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    for manifest in manifests {
        println!(
            " {} {} — {} dependencies ({})",
            "→".cyan(),
            manifest.ecosystem.display_name(),
            manifest.dependencies.len(),
            manifest.source_file.display()
        );
    }
    println!();

    if !findings.is_empty() {
        println!(" {} Vulnerable dependencies:\n", "[VULN]".red().bold());
        render_findings_table(findings);
        println!();
    }

    if verbose {
        println!(" {} All parsed dependencies:\n", "[DEPS]".cyan().bold());
        render_dependency_table(manifests);
        println!();
    }

    Ok(())
}

fn render_findings_table(findings: &[Finding]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Ecosystem").add_attribute(Attribute::Bold),
            Cell::new("Vulnerability").add_attribute(Attribute::Bold),
            Cell::new("Summary").add_attribute(Attribute::Bold),
        ]);

    for finding in findings {
        table.add_row(vec![
            Cell::new(&finding.dependency.name),
            Cell::new(&finding.dependency.version),
            Cell::new(finding.ecosystem.to_string()),
            Cell::new(&finding.vulnerability_id).fg(Color::Red),
            Cell::new(finding.summary.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{table}");
}

fn render_dependency_table(manifests: &[ParsedDependencies]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Ecosystem").add_attribute(Attribute::Bold),
        ]);

    for manifest in manifests {
        for dep in &manifest.dependencies {
            table.add_row(vec![
                Cell::new(&dep.name),
                Cell::new(&dep.version),
                Cell::new(manifest.ecosystem.to_string()),
            ]);
        }
    }

    println!("{table}");
}
