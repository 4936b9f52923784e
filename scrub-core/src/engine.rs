// scrub-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! The `SanitizationEngine` trait provides a pluggable interface for
//! sanitization methods. This module defines the contract that all such
//! engines must adhere to, ensuring a consistent and interchangeable core
//! API for `scrub`.

use anyhow::Result;

use crate::config::{RedactionConfig, RedactionSummaryItem};
use crate::redaction_match::RedactionMatch;
use crate::sanitizers::compiler::CompiledRules;

/// A trait that defines the core functionality of a sanitization engine.
///
/// This trait decouples the high-level application logic from the specific
/// implementation of a sanitization method, allowing for different engines
/// to be used interchangeably. Engines are pure functions of (rule set,
/// input text); they hold no per-call state, so a single instance may be
/// shared across threads.
pub trait SanitizationEngine: Send + Sync {
    /// Performs full sanitization on the provided content.
    ///
    /// Finds all sensitive data in rule-priority order, applies redactions,
    /// and generates a summary of all matched items. Returns the fully
    /// sanitized content and the summary. There is no input for which this
    /// fails: text nothing matches passes through unchanged.
    ///
    /// # Arguments
    /// * `content` - The input string to sanitize.
    /// * `source_id` - The name or identifier of the source being processed.
    fn sanitize(
        &self,
        content: &str,
        source_id: &str,
    ) -> Result<(String, Vec<RedactionSummaryItem>)>;

    /// Analyzes the provided content for sensitive data without returning
    /// redacted text.
    ///
    /// This drives detection-only reporting (the `scan` command). Detection
    /// semantics are identical to [`SanitizationEngine::sanitize`].
    fn analyze_for_stats(&self, content: &str, source_id: &str) -> Result<Vec<RedactionSummaryItem>>;

    /// Finds all matches, with stable ordering and canonical sample hashes.
    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<RedactionMatch>>;

    /// Returns a reference to the `CompiledRules` used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's configuration.
    fn rules(&self) -> &RedactionConfig;
}
