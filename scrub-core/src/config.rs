//! Configuration management for `scrub-core`.
//!
//! This module defines the redaction rules and the rule registry. It handles
//! serialization/deserialization of YAML rule files and provides utilities
//! for loading, registering, merging, and validating rules.
//!
//! The registry is plain data until it is handed to an engine; compilation
//! freezes it into an immutable, priority-ordered set. All validation happens
//! here and in the compiler, so a malformed rule can never reach a running
//! engine.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::ScrubError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// What to substitute for a matched span.
///
/// This is deliberately a closed set rather than a template language: a match
/// is either replaced wholesale by a fixed placeholder, or a single capture
/// group (the non-secret key name and its separator) is kept verbatim and the
/// placeholder is appended after it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Replacement {
    /// Replace the whole match with this literal.
    Literal(String),
    /// Keep capture group `keep_group` verbatim, then append `append`.
    KeepGroup { keep_group: usize, append: String },
}

impl Replacement {
    /// Renders the replacement text for a single set of captures.
    pub fn render(&self, caps: &regex::Captures) -> String {
        match self {
            Replacement::Literal(text) => text.clone(),
            Replacement::KeepGroup { keep_group, append } => {
                let kept = caps.get(*keep_group).map(|g| g.as_str()).unwrap_or("");
                let mut out = String::with_capacity(kept.len() + append.len());
                out.push_str(kept);
                out.push_str(append);
                out
            }
        }
    }
}

/// Represents a single redaction rule used by the regex engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct RedactionRule {
    /// Unique identifier for the rule (e.g., "aws_access_key").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: String,
    /// The substitution applied to every match of `pattern`.
    pub replace_with: Replacement,
    /// Application order: lower values run earlier. Ties keep registration order.
    pub priority: i32,
    /// If true, the pattern matches case-insensitively. Key names arrive in
    /// arbitrary casing, so this defaults to true.
    pub case_insensitive: bool,
    /// If true, enables multiline mode (`^`/`$` match line boundaries).
    pub multiline: bool,
    /// If true, the dot character `.` in regex will match newlines.
    pub dot_matches_new_line: bool,
    /// If true, the rule is disabled unless explicitly enabled.
    pub opt_in: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// Optional pattern reported after this rule's pass if it still matches
    /// the buffer: content the rule recognized but deliberately left alone,
    /// e.g. a block missing its end marker.
    pub residual_diagnostic: Option<String>,
    /// Security severity level (e.g., "high", "medium").
    pub severity: Option<String>,
    /// Metadata tags for categorization.
    pub tags: Option<Vec<String>>,
}

impl Default for RedactionRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: String::new(),
            replace_with: Replacement::Literal("[REDACTED]".to_string()),
            priority: 100,
            case_insensitive: true,
            multiline: true,
            dot_matches_new_line: false,
            opt_in: false,
            enabled: None,
            residual_diagnostic: None,
            severity: None,
            tags: None,
        }
    }
}

/// The rule registry: the canonical, ordered collection of redaction rules.
///
/// Construction-time operations (`register`, the loaders) validate every rule,
/// so the set handed to an engine is known-good. Engines treat the registry as
/// read-only; per-call state never touches it.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RedactionConfig {
    /// The registered redaction rules, in registration order.
    pub rules: Vec<RedactionRule>,
}

/// Represents a single item in the redaction summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
    pub original_texts: Vec<String>,
    pub sanitized_texts: Vec<String>,
}

impl RedactionConfig {
    /// Loads the built-in rule set from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RedactionConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        validate_rules(&config.rules)?;
        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Loads redaction rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: RedactionConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Registers an additional rule without touching the built-ins.
    ///
    /// Fails with [`ScrubError::DuplicateRuleId`] if a rule with the same name
    /// already exists, and with [`ScrubError::InvalidPattern`] /
    /// [`ScrubError::MissingCaptureGroup`] if the rule itself is malformed.
    /// Invalid rules never enter the registry.
    pub fn register(&mut self, rule: RedactionRule) -> Result<(), ScrubError> {
        if self.rules.iter().any(|r| r.name == rule.name) {
            return Err(ScrubError::DuplicateRuleId(rule.name));
        }
        validate_rule(&rule)?;
        debug!("Registered rule '{}' (priority {}).", rule.name, rule.priority);
        self.rules.push(rule);
        Ok(())
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| {
            let rule_name_str = rule.name.as_str();
            !disable_set.contains(rule_name_str)
                && (!rule.opt_in || enable_set.contains(rule_name_str))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Merges user-defined rules with the defaults.
///
/// A user rule with the same name replaces the default in place, so priority
/// ties keep a deterministic registration order; new user rules are appended
/// after the defaults in the order they were written.
pub fn merge_rules(
    default_config: RedactionConfig,
    user_config: Option<RedactionConfig>,
) -> RedactionConfig {
    debug!(
        "merge_rules called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => *existing = user_rule,
                None => final_rules.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());

    RedactionConfig { rules: final_rules }
}

/// Validates a single rule: the pattern compiles, stays within the length
/// cap, and the replacement only keeps a capture group the pattern defines.
pub fn validate_rule(rule: &RedactionRule) -> Result<(), ScrubError> {
    if rule.name.is_empty() {
        return Err(ScrubError::Fatal("A rule has an empty `name` field.".to_string()));
    }
    if rule.pattern.is_empty() {
        return Err(ScrubError::Fatal(format!(
            "Rule '{}' has an empty `pattern` field.",
            rule.name
        )));
    }
    if rule.pattern.len() > MAX_PATTERN_LENGTH {
        return Err(ScrubError::PatternLengthExceeded(
            rule.name.clone(),
            rule.pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let regex = Regex::new(&rule.pattern)
        .map_err(|e| ScrubError::InvalidPattern(rule.name.clone(), e))?;

    if let Replacement::KeepGroup { keep_group, .. } = &rule.replace_with {
        let available = regex.captures_len().saturating_sub(1);
        if *keep_group == 0 || *keep_group > available {
            return Err(ScrubError::MissingCaptureGroup(
                rule.name.clone(),
                *keep_group,
                available,
            ));
        }
    }

    if let Some(diag) = &rule.residual_diagnostic {
        Regex::new(diag).map_err(|e| ScrubError::InvalidPattern(rule.name.clone(), e))?;
    }

    Ok(())
}

/// Validates rule integrity (unique ids, regex compilation, capture groups).
fn validate_rules(rules: &[RedactionRule]) -> Result<(), ScrubError> {
    let mut rule_names = HashSet::new();
    for rule in rules {
        if !rule_names.insert(rule.name.as_str()) {
            return Err(ScrubError::DuplicateRuleId(rule.name.clone()));
        }
        validate_rule(rule)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_rule(name: &str, pattern: &str, keep_group: usize) -> RedactionRule {
        RedactionRule {
            name: name.to_string(),
            pattern: pattern.to_string(),
            replace_with: Replacement::KeepGroup {
                keep_group,
                append: "[X]".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn register_rejects_duplicate_ids() {
        let mut config = RedactionConfig::default();
        config
            .register(RedactionRule {
                name: "one".to_string(),
                pattern: "a+".to_string(),
                ..Default::default()
            })
            .unwrap();
        let err = config
            .register(RedactionRule {
                name: "one".to_string(),
                pattern: "b+".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ScrubError::DuplicateRuleId(name) if name == "one"));
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn register_rejects_invalid_patterns() {
        let mut config = RedactionConfig::default();
        let err = config
            .register(RedactionRule {
                name: "broken".to_string(),
                pattern: "(unclosed".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ScrubError::InvalidPattern(name, _) if name == "broken"));
        assert!(config.rules.is_empty());
    }

    #[test]
    fn validate_rule_checks_kept_group_exists() {
        let err = validate_rule(&keyed_rule("keyed", "no groups here", 1)).unwrap_err();
        assert!(matches!(err, ScrubError::MissingCaptureGroup(_, 1, 0)));

        assert!(validate_rule(&keyed_rule("keyed", "(group)", 1)).is_ok());
    }

    #[test]
    fn replacement_yaml_forms_round_trip() {
        let literal: Replacement = serde_yml::from_str("\"[EMAIL_REDACTED]\"").unwrap();
        assert_eq!(literal, Replacement::Literal("[EMAIL_REDACTED]".to_string()));

        let keyed: Replacement =
            serde_yml::from_str("keep_group: 1\nappend: \"[TOKEN_REDACTED]\"").unwrap();
        assert_eq!(
            keyed,
            Replacement::KeepGroup {
                keep_group: 1,
                append: "[TOKEN_REDACTED]".to_string()
            }
        );
    }
}
