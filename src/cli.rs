//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vulnscan",
    version,
    about = "Static vulnerability signature scanner",
    long_about = "vulnscan — a tiny, fast CLI that scans source text against a catalog of vulnerability signatures and reports findings with severity-bucketed summaries.\n\nConfiguration precedence: CLI > vulnscan.toml > defaults.",
    after_help = "Examples:\n  vulnscan scan src/**/*.js\n  vulnscan scan --code \"eval(userInput)\"\n  vulnscan scan src/*.js --output json\n  vulnscan rules --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scanning and catalog inspection.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current vulnscan version."
    )]
    Version,
    /// Scan inline code or files for vulnerability signatures
    #[command(
        about = "Run signature scan",
        long_about = "Scan inline code (--code) or files matched by glob patterns against the rule catalog. High-severity findings set a non-zero exit for CI.",
        after_help = "Examples:\n  vulnscan scan src/**/*.js\n  vulnscan scan --code \"eval(x)\" --filename inline.js\n  vulnscan scan lib/*.js --output json"
    )]
    Scan {
        #[arg(help = "Glob patterns of files to scan (relative to repo root)")]
        patterns: Vec<String>,
        #[arg(long, help = "Inline code to scan instead of files")]
        code: Option<String>,
        #[arg(long, help = "Filename label for inline code (default: snippet.js)")]
        filename: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// List the effective rule catalog
    #[command(
        about = "List rules",
        long_about = "Print the effective rule catalog: built-in signatures plus any [[rules]] entries from vulnscan.toml."
    )]
    Rules {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
