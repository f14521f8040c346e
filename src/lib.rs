//! vulnscan core library.
//!
//! This crate exposes programmatic APIs for scanning source text against a
//! catalog of vulnerability signatures and aggregating findings into a
//! severity-bucketed summary.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `catalog`: The fixed, ordered rule table and config-supplied extensions.
//! - `scan`: The scan engine: matching, snippet windowing, aggregation.
//! - `models`: Data models for findings, summaries, and scan results.
//! - `output`: Human/JSON printers for scan and rules listings.
pub mod catalog;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod scan;
