// crates/common/src/config.rs

//! Runner configuration read from the environment.

use crate::log::{LogLevel, Logger};
use crate::Emit;

/// Stderr verbosity: `off`, `info` or `debug`.
pub const LOG_VAR: &str = "FUNCTION_LOG";

/// When truthy, every success line is written behind the output marker.
pub const MARKER_VAR: &str = "FUNCTION_OUTPUT_MARKER";

/// Settings for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerConfig {
    pub emit: Emit,
    pub log_level: LogLevel,
    warnings: Vec<String>,
}

impl RunnerConfig {
    /// Load `.env` if present, then read the process environment.
    ///
    /// Invalid values fall back to their defaults and are reported on stderr.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let config = Self::from_lookup(|key| std::env::var(key).ok());

        let logger = config.logger();
        for warning in &config.warnings {
            logger.warn(warning);
        }
        config
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_VAR) {
            match raw.parse::<LogLevel>() {
                Ok(level) => config.log_level = level,
                Err(e) => config.warnings.push(format!("{LOG_VAR}: {e}, logging disabled")),
            }
        }

        if let Some(raw) = lookup(MARKER_VAR) {
            match parse_flag(&raw) {
                Some(true) => config.emit = Emit::Marked,
                Some(false) => {}
                None => config
                    .warnings
                    .push(format!("{MARKER_VAR}: expected a boolean, got {raw:?}")),
            }
        }

        config
    }

    /// Pin the output framing, overriding the environment.
    pub fn with_emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }

    pub fn logger(&self) -> Logger {
        Logger::new(self.log_level)
    }

    /// Problems found while reading the environment.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
