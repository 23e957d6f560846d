//! Shared default values for the command-line tools.

/// Log filter used when `RUST_LOG` is not set.
pub const LOG_FILTER: &str = "warn";

/// Initialize `env_logger`, honoring `RUST_LOG` over [`LOG_FILTER`].
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(LOG_FILTER))
        .format_timestamp(None)
        .init();
}
