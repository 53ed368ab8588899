//! Process-wide logger setup for the binaries.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs an `env_logger` writing to stderr so the stdout transcript stays clean.
///
/// Dependencies log at `warn`, the binaries at `info`, and the table and its
/// workload at `warn` since they trace every arena slot at lower levels.
/// `RUST_LOG` overrides all of it. Safe to call more than once.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("hash_lookup", LevelFilter::Info)
            .filter_module("hashbench", LevelFilter::Info)
            .filter_module("hashbench::cs::hashing", LevelFilter::Warn)
            .format_timestamp_millis()
            .parse_default_env();

        let _ = builder.try_init();
    });
}
