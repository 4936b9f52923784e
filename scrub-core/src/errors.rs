//! errors.rs - Custom error types for the scrub-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! All variants are construction-time failures; sanitization itself has no
//! error path.

use thiserror::Error;

/// This enum represents all possible error types in the `scrub-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScrubError {
    #[error("Rule '{0}': pattern does not compile: {1}")]
    InvalidPattern(String, regex::Error),

    #[error("Duplicate rule id: '{0}'")]
    DuplicateRuleId(String),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Rule '{0}': replacement keeps capture group {1}, but the pattern only defines {2} group(s)")]
    MissingCaptureGroup(String, usize, usize),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
