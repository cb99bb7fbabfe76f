//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

use serde::{Deserialize, Serialize};
use std::sync::Once;

/// Logger configuration
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "scene_core=debug"). When unset, `RUST_LOG` is used, then `info`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Explicit filter directive
    pub filter: Option<String>,
}

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// Idempotent; only the first call installs the logger.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        // Another logger may already be installed by the embedder.
        if builder.try_init().is_err() {
            log::debug!("logger already initialized, keeping existing one");
        }
    });
}
