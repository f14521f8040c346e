//! vulnscan CLI binary entry point.
//! Delegates to modules for catalog/scan work and prints results.

use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use vulnscan::catalog::Catalog;
use vulnscan::cli::{Cli, Commands};
use vulnscan::models::{Finding, ScanResult};
use vulnscan::{config, output, scan};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Scan {
            patterns,
            code,
            filename,
            repo_root,
            output: out,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                out.as_deref(),
                filename.as_deref(),
            );
            // Friendly note if no vulnscan config was found
            if eff.output != "json" && config::load_config(&eff.repo_root).is_none() {
                eprintln!(
                    "{} {}",
                    output::note_prefix(),
                    "No vulnscan.toml found; using built-in rules and defaults."
                );
            }
            let catalog = load_catalog_or_exit(&eff.repo_root);
            let res = if let Some(code) = code.as_deref() {
                scan::scan(&catalog, code, Some(&eff.filename))
            } else if !patterns.is_empty() {
                match scan_files(&catalog, &eff.repo_root, &patterns) {
                    Ok(r) => r,
                    Err(msg) => {
                        eprintln!("{} {}", output::error_prefix(), msg);
                        std::process::exit(2);
                    }
                }
            } else {
                eprintln!(
                    "{} {}",
                    output::error_prefix(),
                    "Nothing to scan. Pass file patterns or --code."
                );
                std::process::exit(2);
            };
            output::print_scan(&res, &eff.output);
            // High findings gate CI exits
            if res.summary.by_severity.high > 0 {
                std::process::exit(1);
            }
        }
        Commands::Rules {
            repo_root,
            output: out,
        } => {
            let eff = config::resolve_effective(repo_root.as_deref(), out.as_deref(), None);
            let catalog = load_catalog_or_exit(&eff.repo_root);
            output::print_rules(&catalog, &eff.output);
        }
    }
}

/// Build the effective catalog or report the authoring error and exit.
fn load_catalog_or_exit(root: &Path) -> Catalog {
    match config::effective_catalog(root) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", output::error_prefix(), e);
            std::process::exit(2);
        }
    }
}

/// Expand glob patterns relative to the repo root, scan each file in
/// parallel, and merge findings keeping input file order.
fn scan_files(catalog: &Catalog, root: &Path, patterns: &[String]) -> Result<ScanResult, String> {
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries =
            glob::glob(&pattern).map_err(|e| format!("bad glob pattern '{}': {}", pat, e))?;
        for entry in entries.flatten() {
            if entry.is_file() {
                targets.push(entry);
            }
        }
    }
    if targets.is_empty() {
        return Err("No files matched the given patterns.".to_string());
    }

    let per_file: Vec<Vec<Finding>> = targets
        .par_iter()
        .map(|path| {
            let data = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(_) => return Vec::new(),
            };
            let label = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.clone());
            let label = label.to_string_lossy();
            scan::scan(catalog, &data, Some(label.as_ref())).findings
        })
        .collect();
    let findings: Vec<Finding> = per_file.into_iter().flatten().collect();
    let summary = scan::summarize(&findings);
    Ok(ScanResult { summary, findings })
}
