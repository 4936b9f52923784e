//! compiler.rs - Manages the compilation and caching of redaction rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `RedactionConfig` into `CompiledRules`, which are optimized for
//! efficient sanitization. It uses a global, shared cache to avoid
//! redundant compilation.

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{RedactionConfig, RedactionRule, Replacement, MAX_PATTERN_LENGTH};
use crate::errors::ScrubError;

/// Represents a single compiled redaction rule.
///
/// This struct holds a compiled regular expression along with its associated
/// replacement and metadata, ready for efficient application to content.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The substitution applied to matches of this rule's pattern.
    pub replace_with: Replacement,
    /// The unique name of the redaction rule.
    pub name: String,
    /// The rule's application order.
    pub priority: i32,
    /// Compiled residual diagnostic, if the rule declares one.
    pub residual: Option<Regex>,
}

/// The frozen, priority-ordered collection of compiled rules.
///
/// Once built, the set is immutable; engines share it through an `Arc` and
/// apply the rules front to back.
#[derive(Debug)]
pub struct CompiledRules {
    /// Compiled rules in ascending priority order (ties keep registration order).
    pub rules: Vec<CompiledRule>,
}

lazy_static! {
    /// A thread-safe, global cache for compiled rules.
    /// The key is a hash of the `RedactionConfig` contents.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

/// Hashes the `RedactionConfig` to create a stable, unique key for the cache.
///
/// To ensure determinism, the rules are sorted by name before hashing.
fn hash_config(config: &RedactionConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    let mut rules_to_hash = config.rules.clone();

    rules_to_hash.sort_by(|a, b| a.name.cmp(&b.name));
    rules_to_hash.hash(&mut hasher);
    hasher.finish()
}

fn build_regex(rule: &RedactionRule, pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(rule.case_insensitive)
        .multi_line(rule.multiline)
        .dot_matches_new_line(rule.dot_matches_new_line)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
}

/// Compiles a list of `RedactionRule`s into `CompiledRules` for efficient matching.
/// This is the low-level function that performs the actual regex compilation.
///
/// The output is sorted by ascending priority with a stable sort, so rules
/// sharing a priority keep their registration order.
pub fn compile_rules(mut rules_to_compile: Vec<RedactionRule>) -> Result<CompiledRules, ScrubError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    rules_to_compile.sort_by_key(|rule| rule.priority);

    let mut compiled_rules = Vec::new();
    let mut compilation_errors: Vec<ScrubError> = Vec::new();

    for rule in rules_to_compile {
        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ScrubError::PatternLengthExceeded(
                rule.name,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex = match build_regex(&rule, &rule.pattern) {
            Ok(regex) => regex,
            Err(e) => {
                compilation_errors.push(ScrubError::InvalidPattern(rule.name, e));
                continue;
            }
        };

        if let Replacement::KeepGroup { keep_group, .. } = &rule.replace_with {
            let available = regex.captures_len().saturating_sub(1);
            if *keep_group == 0 || *keep_group > available {
                compilation_errors.push(ScrubError::MissingCaptureGroup(
                    rule.name,
                    *keep_group,
                    available,
                ));
                continue;
            }
        }

        let residual = match &rule.residual_diagnostic {
            Some(diag) => match build_regex(&rule, diag) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    compilation_errors.push(ScrubError::InvalidPattern(rule.name, e));
                    continue;
                }
            },
            None => None,
        };

        log::debug!(
            target: "scrub_core::sanitizer",
            "Rule '{}' compiled successfully.",
            &rule.name
        );
        compiled_rules.push(CompiledRule {
            regex,
            replace_with: rule.replace_with,
            name: rule.name,
            priority: rule.priority,
            residual,
        });
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ScrubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
        Ok(CompiledRules { rules: compiled_rules })
    }
}

/// Gets a `CompiledRules` instance from the cache or compiles them if not found.
///
/// This is the public entry point for retrieving compiled rules. It returns an `Arc`
/// to a `CompiledRules` instance, allowing for cheap sharing.
pub fn get_or_compile_rules(config: &RedactionConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    // Attempt to acquire a read lock first.
    {
        let cache = COMPILED_RULES_CACHE.read().unwrap();
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rules));
        }
    } // Read lock is released here.

    // Not in cache, so we compile.
    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = compile_rules(config.rules.clone())?;
    let compiled_arc = Arc::new(compiled);

    // Acquire a write lock to insert the new rules.
    COMPILED_RULES_CACHE
        .write()
        .unwrap()
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled_arc)
}
