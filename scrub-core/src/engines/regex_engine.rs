// scrub-core/src/engines/regex_engine.rs
//! A `SanitizationEngine` implementation that applies regex redaction rules
//! sequentially, in priority order, over a rebuilding buffer.
//!
//! Each rule gets exactly one non-overlapping scan of the current buffer
//! state; the buffer is rebuilt after the pass, so every later rule observes
//! the already-redacted text and can never be fed a secret an earlier rule
//! consumed. Scanning resumes strictly after each consumed span, never
//! backtracking into replaced territory. Total work is one scan per rule
//! per call.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::config::{RedactionConfig, RedactionSummaryItem};
use crate::engine::SanitizationEngine;
use crate::redaction_match::{ensure_match_hashes, log_redaction_match_debug, RedactionMatch};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: Arc<CompiledRules>,
    config: RedactionConfig,
    disabled: HashSet<String>,
}

impl RegexEngine {
    pub fn new(config: RedactionConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile redaction rules for RegexEngine")?;

        let disabled = config
            .rules
            .iter()
            .filter(|rule| rule.enabled == Some(false))
            .map(|rule| rule.name.clone())
            .collect();

        Ok(Self {
            compiled_rules,
            config,
            disabled,
        })
    }

    /// Runs every enabled rule over the content, in priority order, and
    /// returns the final buffer along with all recorded matches.
    ///
    /// Match offsets are relative to the buffer version the owning rule
    /// scanned, not to the caller's original text.
    fn apply_rules(&self, content: &str, source_id: &str) -> (String, Vec<RedactionMatch>) {
        debug!("Sanitizing '{}' ({} bytes).", source_id, content.len());

        let mut buffer = content.to_string();
        let mut all_matches: Vec<RedactionMatch> = Vec::new();

        for rule in &self.compiled_rules.rules {
            if self.disabled.contains(&rule.name) {
                continue;
            }

            if let Some(rebuilt) = apply_rule_pass(rule, &buffer, &mut all_matches) {
                buffer = rebuilt;
            }

            if let Some(diag) = &rule.residual {
                if diag.is_match(&buffer) {
                    warn!(
                        "Rule '{}': content matching '{}' was left unredacted; \
                         a block may be missing its end marker.",
                        rule.name, diag
                    );
                }
            }
        }

        debug!(
            "Finished '{}': {} match(es) across {} rule(s).",
            source_id,
            all_matches.len(),
            self.compiled_rules.rules.len()
        );
        (buffer, all_matches)
    }

    /// Rolls matches up per rule, in rule application order.
    fn summarize(&self, matches: &[RedactionMatch]) -> Vec<RedactionSummaryItem> {
        let mut summary = Vec::new();
        for rule in &self.compiled_rules.rules {
            let rule_matches: Vec<&RedactionMatch> = matches
                .iter()
                .filter(|m| m.rule_name == rule.name)
                .collect();
            if rule_matches.is_empty() {
                continue;
            }
            summary.push(RedactionSummaryItem {
                rule_name: rule.name.clone(),
                occurrences: rule_matches.len(),
                original_texts: rule_matches.iter().map(|m| m.original_string.clone()).collect(),
                sanitized_texts: rule_matches.iter().map(|m| m.sanitized_string.clone()).collect(),
            });
        }
        summary
    }
}

/// Applies one rule's single pass over the buffer.
///
/// Returns the rebuilt buffer, or `None` when nothing matched and the buffer
/// can be reused as-is. Matches within the pass are non-overlapping and are
/// consumed left to right.
fn apply_rule_pass(
    rule: &CompiledRule,
    buffer: &str,
    all_matches: &mut Vec<RedactionMatch>,
) -> Option<String> {
    let mut rebuilt = String::with_capacity(buffer.len());
    let mut last_end = 0usize;
    let mut matched = false;

    for caps in rule.regex.captures_iter(buffer) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() == whole.end() {
            continue;
        }

        let replacement = rule.replace_with.render(&caps);
        log_redaction_match_debug(module_path!(), &rule.name, whole.as_str(), &replacement);

        let line_number = 1 + buffer[..whole.start()]
            .bytes()
            .filter(|b| *b == b'\n')
            .count() as u64;

        all_matches.push(RedactionMatch {
            rule_name: rule.name.clone(),
            original_string: whole.as_str().to_string(),
            sanitized_string: replacement.clone(),
            start: whole.start() as u64,
            end: whole.end() as u64,
            line_number: Some(line_number),
            sample_hash: None,
        });

        rebuilt.push_str(&buffer[last_end..whole.start()]);
        rebuilt.push_str(&replacement);
        last_end = whole.end();
        matched = true;
    }

    if !matched {
        return None;
    }
    rebuilt.push_str(&buffer[last_end..]);
    Some(rebuilt)
}

impl SanitizationEngine for RegexEngine {
    fn sanitize(
        &self,
        content: &str,
        source_id: &str,
    ) -> Result<(String, Vec<RedactionSummaryItem>)> {
        let (sanitized_content, matches) = self.apply_rules(content, source_id);
        let summary = self.summarize(&matches);
        Ok((sanitized_content, summary))
    }

    fn analyze_for_stats(&self, content: &str, source_id: &str) -> Result<Vec<RedactionSummaryItem>> {
        let (_, matches) = self.apply_rules(content, source_id);
        Ok(self.summarize(&matches))
    }

    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<RedactionMatch>> {
        let (_, mut matches) = self.apply_rules(content, source_id);
        ensure_match_hashes(&mut matches);
        Ok(matches)
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn rules(&self) -> &RedactionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RedactionRule, Replacement};

    fn engine_with(rules: Vec<RedactionRule>) -> RegexEngine {
        RegexEngine::new(RedactionConfig { rules }).unwrap()
    }

    #[test]
    fn single_pass_matches_do_not_overlap() {
        let engine = engine_with(vec![RedactionRule {
            name: "aa".to_string(),
            pattern: "aa".to_string(),
            replace_with: Replacement::Literal("[A]".to_string()),
            ..Default::default()
        }]);
        // Five 'a's: two non-overlapping matches, the trailing one survives.
        let (out, summary) = engine.sanitize("aaaaa", "test").unwrap();
        assert_eq!(out, "[A][A]a");
        assert_eq!(summary[0].occurrences, 2);
    }

    #[test]
    fn later_rules_see_earlier_placeholders_not_secrets() {
        let engine = engine_with(vec![
            RedactionRule {
                name: "specific".to_string(),
                pattern: "secret-123".to_string(),
                replace_with: Replacement::Literal("[SPECIFIC]".to_string()),
                priority: 1,
                ..Default::default()
            },
            RedactionRule {
                name: "generic".to_string(),
                pattern: r"secret-\d+".to_string(),
                replace_with: Replacement::Literal("[GENERIC]".to_string()),
                priority: 2,
                ..Default::default()
            },
        ]);
        let (out, _) = engine.sanitize("secret-123 secret-456", "test").unwrap();
        assert_eq!(out, "[SPECIFIC] [GENERIC]");
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let engine = engine_with(vec![RedactionRule {
            name: "off".to_string(),
            pattern: "x+".to_string(),
            replace_with: Replacement::Literal("[X]".to_string()),
            enabled: Some(false),
            ..Default::default()
        }]);
        let (out, summary) = engine.sanitize("xxx", "test").unwrap();
        assert_eq!(out, "xxx");
        assert!(summary.is_empty());
    }

    #[test]
    fn match_line_numbers_are_recorded() {
        let engine = engine_with(vec![RedactionRule {
            name: "needle".to_string(),
            pattern: "needle".to_string(),
            replace_with: Replacement::Literal("[N]".to_string()),
            ..Default::default()
        }]);
        let matches = engine.find_matches("hay\nhay needle\n", "test").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, Some(2));
        assert!(matches[0].sample_hash.is_some());
    }
}
