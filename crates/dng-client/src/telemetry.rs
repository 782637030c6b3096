//! Tracing subscriber setup.
//!
//! Safe to call from every test: only the first call installs a subscriber.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install a global `tracing` subscriber for `config`.
///
/// Returns `true` if a subscriber from this crate is active, `false` if some
/// other subscriber was already installed.
pub fn init_tracing(config: &LogConfig) -> bool {
    *INSTALLED.get_or_init(|| install(config))
}

fn install(config: &LogConfig) -> bool {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_test_writer();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    match result {
        Ok(()) => {
            tracing::debug!(
                log_level = %config.log_level,
                json_logs = config.json_logs,
                "Tracing initialized"
            );
            true
        }
        Err(_) => false,
    }
}
