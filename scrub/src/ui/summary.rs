// scrub/src/ui/summary.rs
//! Redaction summary rendering.
//!
//! The summary goes to stderr so stdout stays a clean pipe of sanitized
//! text. Only rule names and counts are printed; original match text never
//! leaves the engine through this path.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

use scrub_core::RedactionSummaryItem;

pub fn print_summary(
    summary: &[RedactionSummaryItem],
    writer: &mut dyn Write,
    use_color: bool,
) -> Result<()> {
    writeln!(writer, "--- Redaction Summary ---")?;
    if summary.is_empty() {
        writeln!(writer, "No redactions applied.")?;
        return Ok(());
    }

    for item in summary {
        let name = if use_color {
            item.rule_name.yellow().to_string()
        } else {
            item.rule_name.clone()
        };
        writeln!(writer, "{} ({} occurrences)", name, item.occurrences)?;
    }
    Ok(())
}
