// scrub/src/lib.rs
//! # Scrub CLI Application
//!
//! This crate provides the command-line interface for the Scrub redaction
//! engine: it reads text from a file or stdin, hands it to `scrub-core`, and
//! writes the sanitized result wherever the user directs it. All I/O lives
//! here; the core never touches the filesystem.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
