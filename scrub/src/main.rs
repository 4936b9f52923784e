// scrub/src/main.rs
//! Scrub entry point.
//!
//! Builds the effective rule configuration, instantiates the sanitization
//! engine, and dispatches to the requested command.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::io;

use scrub::cli::{Cli, Commands};
use scrub::commands::{build_config, read_input, source_id_for};
use scrub::commands::sanitize::{run_sanitize, run_sanitize_line_buffered, SanitizeOptions};
use scrub::commands::scan::{run_scan, ScanOptions};
use scrub::logger;

use scrub_core::engine::SanitizationEngine;
use scrub_core::RegexEngine;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        Some(LevelFilter::Debug)
    } else if cli.quiet {
        Some(LevelFilter::Off)
    } else {
        None
    };
    logger::init_logger(level);

    match cli.command {
        Commands::Sanitize(cmd) => {
            let config = build_config(cmd.config.as_deref(), &cmd.enable, &cmd.disable)?;
            let engine: Box<dyn SanitizationEngine> = Box::new(RegexEngine::new(config)?);

            if cmd.line_buffered {
                match &cmd.input_file {
                    Some(path) => {
                        let file = std::fs::File::open(path).map_err(|e| {
                            anyhow::anyhow!("Failed to open input file {}: {}", path.display(), e)
                        })?;
                        let mut reader = io::BufReader::new(file);
                        run_sanitize_line_buffered(engine.as_ref(), &mut reader)
                    }
                    None => {
                        let stdin = io::stdin();
                        let mut reader = stdin.lock();
                        run_sanitize_line_buffered(engine.as_ref(), &mut reader)
                    }
                }
            } else {
                let input = read_input(cmd.input_file.as_deref())?;
                run_sanitize(
                    engine.as_ref(),
                    SanitizeOptions {
                        input,
                        source_id: source_id_for(cmd.input_file.as_ref()),
                        output_path: cmd.output,
                        no_redaction_summary: cmd.no_summary,
                        quiet: cli.quiet,
                    },
                )
            }
        }
        Commands::Scan(cmd) => {
            let config = build_config(cmd.config.as_deref(), &cmd.enable, &cmd.disable)?;
            let engine: Box<dyn SanitizationEngine> = Box::new(RegexEngine::new(config)?);

            let input = read_input(cmd.input_file.as_deref())?;
            run_scan(
                engine.as_ref(),
                ScanOptions {
                    input,
                    source_id: source_id_for(cmd.input_file.as_ref()),
                    json_stdout: cmd.json_stdout,
                    json_file: cmd.json_file,
                    sample_matches: cmd.sample_matches,
                    fail_over_threshold: cmd.fail_over_threshold,
                    quiet: cli.quiet,
                },
            )
        }
    }
}
