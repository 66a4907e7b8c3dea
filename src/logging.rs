use env_logger::{Builder, Env};

const DEFAULT_FILTER: &str = "warn";

/// Sends `log` records to stderr, filtered by `RUST_LOG` (default `warn`).
/// Calling it again is a no-op.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp(None)
        .try_init()
        .ok();
}
