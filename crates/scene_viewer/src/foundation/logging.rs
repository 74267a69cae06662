//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with the default filter (`info`)
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system with `default_filter` as the filter
///
/// `RUST_LOG` still takes precedence when it is set. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init_with_level(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::trace!("Logger already initialized");
    }
}
