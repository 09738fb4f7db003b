//! Logger setup for host binaries
//!
//! The library itself only emits through the `log` facade.

/// Install `env_logger`, falling back to `filter` when `RUST_LOG` is unset
///
/// Returns `false` if a logger was already installed.
pub fn init_with_default(filter: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .try_init()
        .is_ok()
}
