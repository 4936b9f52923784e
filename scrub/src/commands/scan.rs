// scrub/src/commands/scan.rs
//! Scan command implementation: detection statistics without emitting
//! sanitized text.
//!
//! Console and JSON output never contain original match text; samples are
//! shown length-elided and identified by their canonical hashes, so a scan
//! report is itself safe to share.

use anyhow::{bail, Context, Result};
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use scrub_core::engine::SanitizationEngine;
use scrub_core::redact_sensitive;

/// Options for a single scan run.
pub struct ScanOptions {
    pub input: String,
    pub source_id: String,
    pub json_stdout: bool,
    pub json_file: Option<std::path::PathBuf>,
    pub sample_matches: Option<usize>,
    pub fail_over_threshold: Option<usize>,
    pub quiet: bool,
}

/// One rule's scan statistics, as exported to JSON.
#[derive(Debug, Serialize)]
struct ScanReportItem {
    rule_name: String,
    occurrences: usize,
    sample_hashes: Vec<String>,
}

/// The main operation runner for `scrub scan`.
pub fn run_scan(engine: &dyn SanitizationEngine, opts: ScanOptions) -> Result<()> {
    info!("Starting scan operation.");

    let summary = engine
        .analyze_for_stats(&opts.input, &opts.source_id)
        .context("Scan failed")?;
    let matches = engine.find_matches(&opts.input, &opts.source_id)?;

    let mut hashes_by_rule: HashMap<&str, Vec<String>> = HashMap::new();
    for m in &matches {
        if let Some(hash) = &m.sample_hash {
            let entry = hashes_by_rule.entry(m.rule_name.as_str()).or_default();
            if !entry.contains(hash) {
                entry.push(hash.clone());
            }
        }
    }

    let report: Vec<ScanReportItem> = summary
        .iter()
        .map(|item| ScanReportItem {
            rule_name: item.rule_name.clone(),
            occurrences: item.occurrences,
            sample_hashes: hashes_by_rule.remove(item.rule_name.as_str()).unwrap_or_default(),
        })
        .collect();

    if let Some(path) = &opts.json_file {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
        info!("Scan report written to {}.", path.display());
    }

    if opts.json_stdout {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{}", json);
    } else if !opts.quiet {
        print_console_report(&opts, &summary, &mut io::stderr())?;
    }

    let total: usize = summary.iter().map(|item| item.occurrences).sum();
    if let Some(threshold) = opts.fail_over_threshold {
        if total > threshold {
            bail!("Detected {} secret(s), exceeding the threshold of {}", total, threshold);
        }
    }

    info!("Scan operation completed.");
    Ok(())
}

fn print_console_report(
    opts: &ScanOptions,
    summary: &[scrub_core::RedactionSummaryItem],
    writer: &mut dyn Write,
) -> Result<()> {
    let use_color = io::stderr().is_terminal();

    writeln!(writer, "--- Scan Summary ---")?;
    if summary.is_empty() {
        writeln!(writer, "No sensitive data detected.")?;
        return Ok(());
    }

    for item in summary {
        let name = if use_color {
            item.rule_name.yellow().to_string()
        } else {
            item.rule_name.clone()
        };
        writeln!(writer, "{} ({} occurrences)", name, item.occurrences)?;

        if let Some(limit) = opts.sample_matches {
            let mut seen: Vec<&str> = Vec::new();
            for original in &item.original_texts {
                if seen.len() >= limit {
                    break;
                }
                if seen.contains(&original.as_str()) {
                    continue;
                }
                seen.push(original);
                writeln!(writer, "    sample: {}", redact_sensitive(original))?;
            }
        }
    }

    let total: usize = summary.iter().map(|item| item.occurrences).sum();
    writeln!(writer, "Total: {} detection(s)", total)?;
    Ok(())
}
