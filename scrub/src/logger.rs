// scrub/src/logger.rs
//! Logger initialization for the scrub CLI.

use env_logger::Builder;
use log::LevelFilter;

/// Initializes the global logger.
///
/// With no override, `RUST_LOG` is honored as usual. An explicit level (from
/// `--quiet` or `--debug`) wins over the environment. Logs go to stderr so
/// sanitized output on stdout stays clean for pipes.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_default_env();
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    // try_init: integration tests may initialize more than once.
    let _ = builder.format_timestamp(None).try_init();
}
