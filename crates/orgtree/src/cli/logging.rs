//! Tracing subscriber setup.

use std::io;

use tracing_subscriber::EnvFilter;

/// Installs a stderr fmt subscriber.
///
/// `RUST_LOG` wins when set. Otherwise each `-v` raises the level one step above
/// `warn`, and without `-v` the configured level applies.
pub fn init(verbose: u8, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, configured)));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// The level directive for the given verbosity and configured default.
fn level_for(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => match configured.to_ascii_lowercase().as_str() {
            level @ ("error" | "warn" | "info" | "debug" | "trace") => level.to_string(),
            _ => String::from("warn"),
        },
        1 => String::from("info"),
        2 => String::from("debug"),
        _ => String::from("trace"),
    }
}
