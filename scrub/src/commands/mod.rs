// scrub/src/commands/mod.rs
//! Command implementations and the shared plumbing between them.

pub mod sanitize;
pub mod scan;

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::{Path, PathBuf};

use scrub_core::{merge_rules, RedactionConfig};
use strip_ansi_escapes::strip;

/// Reads the full input, from a file when given or from stdin otherwise.
///
/// Bytes are decoded best-effort: ANSI escape sequences are stripped (pasted
/// terminal output carries them) and invalid UTF-8 sequences degrade to
/// replacement characters instead of aborting the run.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    let bytes = match input_file {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            std::fs::read(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        None => {
            info!("Reading input from stdin...");
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };

    let stripped = strip(&bytes);
    Ok(String::from_utf8_lossy(&stripped).into_owned())
}

/// A stable identifier for the input, used in logs and reports.
pub fn source_id_for(input_file: Option<&PathBuf>) -> String {
    input_file
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdin".to_string())
}

/// Builds the effective rule configuration: defaults, then the user's config
/// file merged over them, then the enable/disable filters.
pub fn build_config(
    config_path: Option<&Path>,
    enable: &[String],
    disable: &[String],
) -> Result<RedactionConfig> {
    let default_config =
        RedactionConfig::load_default_rules().context("Failed to load default rules")?;

    let user_config = match config_path {
        Some(path) => Some(
            RedactionConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(default_config, user_config);
    config.set_active_rules(enable, disable);
    debug!("Effective rule count: {}", config.rules.len());

    Ok(config)
}
