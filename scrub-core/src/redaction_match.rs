//! Provides core data structures and utility functions for managing redaction
//! matches and sensitive data logging within the `scrub-core` library.
//!
//! Anything that leaves the engine for display or logging goes through the
//! helpers here: original match text is only ever printed when the operator
//! explicitly opts in via `SCRUB_ALLOW_DEBUG_PII`.

use log::debug;
use serde::{Deserialize, Serialize};

use hex;
use lazy_static::lazy_static;
use sha2::{Digest, Sha256};

lazy_static! {
    /// A static boolean that is initialized once to determine if PII is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("SCRUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Represents a single instance of a matched and redacted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RedactionMatch {
    pub rule_name: String,
    pub original_string: String,
    pub sanitized_string: String,
    /// Byte offsets within the buffer version the owning rule scanned.
    /// Earlier rules' substitutions shift later offsets, so these are not
    /// positions in the caller's original text.
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub line_number: Option<u64>,
    #[serde(default)]
    pub sample_hash: Option<String>,
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_redaction_match_debug(
    module_path: &str,
    rule_name: &str,
    original_sensitive_content: &str,
    sanitized_content: &str,
) {
    debug!(
        "{} Found RedactionMatch: Rule='{}', Original='{}', Sanitized='{}'",
        module_path,
        rule_name,
        get_loggable_content(original_sensitive_content),
        sanitized_content
    );
}

/// Canonical, leak-free identifier for a matched snippet: hash of the rule id
/// plus the whitespace/case-normalized match text.
pub fn canonical_sample_hash(rule_id: &str, snippet: &str) -> String {
    let normalized = snippet
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn ensure_match_hashes(matches: &mut [RedactionMatch]) {
    for m in matches.iter_mut() {
        if m.sample_hash.is_none() {
            let hash = canonical_sample_hash(&m.rule_name, &m.original_string);
            m.sample_hash = Some(hash);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_canonical_sample_hash_consistency() {
        let h1 = canonical_sample_hash("email", "Test@Example.COM ");
        let h2 = canonical_sample_hash("email", "test@example.com");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_ensure_match_hashes_fills_missing() {
        let mut matches = vec![RedactionMatch {
            rule_name: "email".to_string(),
            original_string: "a@b.io".to_string(),
            ..Default::default()
        }];
        ensure_match_hashes(&mut matches);
        assert!(matches[0].sample_hash.is_some());
    }
}
