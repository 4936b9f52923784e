// scrub-core/src/lib.rs
//! # Scrub Core Library
//!
//! `scrub-core` provides the fundamental, platform-independent logic for
//! redacting sensitive data — credentials, tokens, keys, connection strings,
//! and selected PII — from arbitrary text. It defines the core data
//! structures for redaction rules, provides mechanisms for compiling these
//! rules, and implements a pluggable `SanitizationEngine` trait for applying
//! redaction logic.
//!
//! The library is designed to be pure and stateless, focusing solely on the
//! transformation of input data based on defined rules, without concerns for
//! I/O or application-specific state management. Sanitization is total: for
//! any input text the output is defined, and text no rule matches passes
//! through unchanged.
//!
//! ## Modules
//!
//! * `config`: Defines `RedactionRule`s and the `RedactionConfig` rule registry.
//! * `sanitizers`: Contains engine-specific logic for compiling rules.
//! * `redaction_match`: Defines data structures for detailed reporting of redaction events.
//! * `engine`: Defines the `SanitizationEngine` trait, enabling a modular design.
//! * `engines`: Contains concrete implementations of the `SanitizationEngine` trait.
//! * `headless`: Convenience wrappers for using the core engine in a non-interactive mode.
//!
//! ## Usage Example
//!
//! ```rust
//! use scrub_core::{RedactionConfig, sanitize_string};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Load default redaction rules.
//!     let config = RedactionConfig::load_default_rules()?;
//!
//!     // 2. Sanitize some content in a single call.
//!     let input = "contact me at jane.doe@example.com or 10.0.0.5";
//!     let sanitized = sanitize_string(config, input, "example.txt")?;
//!
//!     assert_eq!(sanitized, "contact me at [EMAIL_REDACTED] or [PRIVATE_IP_REDACTED]");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All failures are construction-time failures: a rule whose pattern does not
//! compile ([`ScrubError::InvalidPattern`]) or a second rule registering an
//! existing id ([`ScrubError::DuplicateRuleId`]) never reaches a running
//! engine. Sanitization itself has no error path.
//!
//! ## Design Principles
//!
//! * **Pluggable Architecture:** The `SanitizationEngine` trait allows
//!   different sanitization methods to be swapped out seamlessly.
//! * **Stateless:** Each sanitize call is independent; nothing persists from
//!   one document to the next.
//! * **Deterministic:** Rules apply in an explicit, auditable priority order.
//! * **Idempotent by construction:** placeholders cannot match any rule, so
//!   re-running the engine over its own output is a no-op.

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod redaction_match;
pub mod sanitizers;

/// Re-exports the public configuration types and functions for managing redaction rules.
pub use config::{
    merge_rules,
    validate_rule,
    RedactionConfig,
    RedactionRule,
    RedactionSummaryItem,
    Replacement,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ScrubError;

/// Re-exports types related to the core sanitization engine trait.
pub use engine::SanitizationEngine;

/// Re-exports the concrete `RegexEngine` implementation.
pub use engines::regex_engine::RegexEngine;

/// Re-exports types for detailed redaction matches and sensitive data reporting.
pub use redaction_match::{
    canonical_sample_hash, ensure_match_hashes, redact_sensitive, RedactionMatch,
};

/// Re-exports the one-shot, non-interactive entry point.
pub use headless::sanitize_string;

/// Re-exports key types from the compiler for advanced usage.
pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
