// scrub-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the core engine in headless mode (non-UI).
//! Provides helper functions for a full, one-shot sanitization of strings.

use anyhow::Result;

use crate::config::RedactionConfig;
use crate::engine::SanitizationEngine;
use crate::engines::regex_engine::RegexEngine;

/// Fully sanitizes an input string by finding and applying all redaction matches.
/// This function is the primary entry point for non-interactive (headless) use.
///
/// # Arguments
///
/// * `config` - The merged RedactionConfig (defaults + optional user overrides).
/// * `content` - The string to be sanitized.
/// * `source_id` - A stable identifier for the input (file path or pseudo id).
pub fn sanitize_string(config: RedactionConfig, content: &str, source_id: &str) -> Result<String> {
    let engine = RegexEngine::new(config)?;
    let (sanitized_content, _) = engine.sanitize(content, source_id)?;
    Ok(sanitized_content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RedactionRule, Replacement};
    use anyhow::Result;

    #[test]
    fn test_sanitize_string_with_custom_rule() -> Result<()> {
        let content = "My email is test@example.com, and another is another@example.net.";
        let config = RedactionConfig {
            rules: vec![RedactionRule {
                name: "email".to_string(),
                pattern: r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[A-Za-z]{2,}".to_string(),
                replace_with: Replacement::Literal("[EMAIL]".to_string()),
                ..Default::default()
            }],
        };

        let sanitized_content = sanitize_string(config, content, "test_input")?;

        let expected_output = "My email is [EMAIL], and another is [EMAIL].";
        assert_eq!(sanitized_content, expected_output);

        Ok(())
    }

    #[test]
    fn test_sanitize_string_with_defaults_passes_clean_text_through() -> Result<()> {
        let config = RedactionConfig::load_default_rules()?;
        let sanitized = sanitize_string(config, "hello world", "test_input")?;
        assert_eq!(sanitized, "hello world");
        Ok(())
    }
}
