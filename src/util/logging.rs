//! Diagnostics for the stackprobe binary
//!
//! Events go to stderr through `tracing`; stdout is reserved for results.
//! `RUST_LOG` replaces the whole filter when set. Otherwise dependencies log
//! at `warn` and stackprobe at the configured level.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

const LEVEL_VAR: &str = "STACKPROBE_LOG_LEVEL";
const JSON_VAR: &str = "STACKPROBE_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,
    /// One JSON object per event instead of the console format
    pub use_json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
        }
    }
}

impl LoggingConfig {
    /// Reads `STACKPROBE_LOG_LEVEL` and `STACKPROBE_LOG_JSON`
    pub fn from_env() -> Self {
        let level = env::var(LEVEL_VAR)
            .map(|v| parse_level(&v))
            .unwrap_or(Level::INFO);
        let use_json = env::var(JSON_VAR)
            .ok()
            .and_then(|v| v.trim().parse::<bool>().ok())
            .unwrap_or(false);
        Self { level, use_json }
    }
}

/// Case-insensitive level name; unknown names warn on stderr and give `INFO`
pub fn parse_level(name: &str) -> Level {
    match name.trim().parse::<Level>() {
        Ok(level) => level,
        Err(_) => {
            eprintln!(
                "Invalid log level '{}', using info. Valid levels: trace, debug, info, warn, error",
                name
            );
            Level::INFO
        }
    }
}

fn filter_for(level: Level) -> EnvFilter {
    match env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(format!("warn,stackprobe={}", level)),
    }
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let json = config
            .use_json
            .then(|| fmt::layer().json().with_writer(std::io::stderr));
        let console = (!config.use_json).then(|| fmt::layer().with_writer(std::io::stderr));

        tracing_subscriber::registry()
            .with(filter_for(config.level))
            .with(json)
            .with(console)
            .init();
    });
}
