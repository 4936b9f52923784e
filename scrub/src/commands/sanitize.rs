// scrub/src/commands/sanitize.rs
//! Sanitize command implementation: run the engine over the input and write
//! the redacted text wherever the user directed it.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};

use is_terminal::IsTerminal;
use scrub_core::engine::SanitizationEngine;

use crate::ui::summary;

/// Options for a single sanitize run.
pub struct SanitizeOptions {
    pub input: String,
    pub source_id: String,
    pub output_path: Option<std::path::PathBuf>,
    pub no_redaction_summary: bool,
    pub quiet: bool,
}

/// The main operation runner for `scrub sanitize`.
pub fn run_sanitize(engine: &dyn SanitizationEngine, opts: SanitizeOptions) -> Result<()> {
    info!("Starting sanitize operation.");

    let (sanitized_content, summary_items) = engine
        .sanitize(&opts.input, &opts.source_id)
        .context("Sanitization failed")?;

    debug!(
        "Content sanitized. Original length: {}, Sanitized length: {}",
        opts.input.len(),
        sanitized_content.len()
    );

    match &opts.output_path {
        Some(path) => {
            info!("Writing sanitized content to file: {}", path.display());
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", sanitized_content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", sanitized_content)?;
        }
    }

    if !opts.no_redaction_summary && !opts.quiet {
        let use_color = io::stderr().is_terminal();
        summary::print_summary(&summary_items, &mut io::stderr(), use_color)?;
    }

    info!("Sanitize operation completed.");
    Ok(())
}

/// Sanitizes one line, swallowing the summary. Used by the line-buffered path.
pub fn sanitize_single_line(line: &str, engine: &dyn SanitizationEngine) -> String {
    let (sanitized_content, _) = engine
        .sanitize(line, "line")
        .unwrap_or_else(|_| (line.to_string(), Vec::new()));
    sanitized_content
}

/// Streaming variant: sanitize and flush one line at a time, so downstream
/// pipe consumers see output as it arrives.
pub fn run_sanitize_line_buffered(
    engine: &dyn SanitizationEngine,
    reader: &mut dyn BufRead,
) -> Result<()> {
    info!("Starting line-buffered sanitize operation.");
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let mut raw_line = Vec::new();
    loop {
        raw_line.clear();
        let read = reader
            .read_until(b'\n', &mut raw_line)
            .context("Failed to read input line")?;
        if read == 0 {
            break;
        }
        let had_newline = raw_line.last() == Some(&b'\n');
        if had_newline {
            raw_line.pop();
            if raw_line.last() == Some(&b'\r') {
                raw_line.pop();
            }
        }

        let stripped = strip_ansi_escapes::strip(&raw_line);
        let line = String::from_utf8_lossy(&stripped);
        let sanitized = sanitize_single_line(&line, engine);
        if had_newline {
            writeln!(writer, "{}", sanitized)?;
        } else {
            write!(writer, "{}", sanitized)?;
        }
        writer.flush()?;
    }

    info!("Line-buffered sanitize operation completed.");
    Ok(())
}
