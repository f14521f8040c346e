//! Output rendering for scan results and the rule catalog.
//!
//! Supports `human` (default) and `json` outputs. The JSON form emits the
//! findings array under the `results` key next to a top-level summary.

use crate::catalog::Catalog;
use crate::models::ScanResult;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Prefix for fatal errors on stderr.
pub fn error_prefix() -> String {
    if stderr_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Prefix for friendly notes on stderr.
pub fn note_prefix() -> String {
    if stderr_colors() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Print scan results in the requested format.
pub fn print_scan(res: &ScanResult, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scan_json(res)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for f in &res.findings {
                let sev = match f.severity.as_str() {
                    "high" => {
                        if color {
                            "⟦high⟧".red().bold().to_string()
                        } else {
                            "⟦high⟧".to_string()
                        }
                    }
                    "medium" => {
                        if color {
                            "⟦medium⟧".yellow().bold().to_string()
                        } else {
                            "⟦medium⟧".to_string()
                        }
                    }
                    _ => {
                        if color {
                            "⟦low⟧".blue().bold().to_string()
                        } else {
                            "⟦low⟧".to_string()
                        }
                    }
                };
                let icon = match f.severity.as_str() {
                    "high" => "✖".red().to_string(),
                    "medium" => "▲".yellow().to_string(),
                    _ => "◆".blue().to_string(),
                };
                let file = if color {
                    f.filename.clone().bold().to_string()
                } else {
                    f.filename.clone()
                };
                println!(
                    "{} {} {}:{} ❲{}❳ — {}",
                    icon, sev, file, f.index, f.rule_id, f.message
                );
            }
            let summary = format!(
                "— Summary — findings={} high={} medium={} low={}",
                res.summary.total_findings,
                res.summary.by_severity.high,
                res.summary.by_severity.medium,
                res.summary.by_severity.low
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print the rule catalog in the requested format.
pub fn print_rules(catalog: &Catalog, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_rules_json(catalog)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for r in catalog.iter() {
                let line = format!(
                    "{:<14} [{:<6}] {}  ({})",
                    r.id,
                    r.severity,
                    r.message,
                    r.pattern.as_str()
                );
                if color && r.severity.as_str() == "high" {
                    println!("{}", line.red());
                } else {
                    println!("{}", line);
                }
            }
        }
    }
}

/// Compose scan JSON object (pure) for testing/snapshot purposes.
///
/// Findings are emitted under `results`; the two names are synonymous at
/// the transport boundary.
pub fn compose_scan_json(res: &ScanResult) -> JsonVal {
    json!({
        "results": res.findings,
        "summary": res.summary,
    })
}

/// Compose rules JSON array (pure) for testing/snapshot purposes.
pub fn compose_rules_json(catalog: &Catalog) -> JsonVal {
    let items: Vec<_> = catalog
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "pattern": r.pattern.as_str(),
                "severity": r.severity,
                "message": r.message,
            })
        })
        .collect();
    JsonVal::Array(items)
}
