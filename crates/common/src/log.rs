// crates/common/src/log.rs

//! Colored stderr logging for function invocations.
//!
//! Stdout carries the single result line, so every diagnostic goes to stderr.

use std::fmt::Display;
use std::str::FromStr;

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Verbosity of stderr diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Only warnings.
    #[default]
    Off,
    Info,
    Debug,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "off" | "none" | "0" => Ok(LogLevel::Off),
            "info" | "1" => Ok(LogLevel::Info),
            "debug" | "trace" | "2" => Ok(LogLevel::Debug),
            other => Err(format!("unknown log level {other:?}")),
        }
    }
}

/// Logger bound to one invocation's verbosity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Off && self.level >= level
    }

    /// Log a debug detail.
    pub fn debug(&self, message: impl Display) {
        if self.enabled(LogLevel::Debug) {
            eprintln!("{CYAN}[debug]{RESET} {DIM}{}{RESET}", message);
        }
    }

    /// Log info message.
    pub fn info(&self, message: impl Display) {
        if self.enabled(LogLevel::Info) {
            eprintln!("{DIM}[info]{RESET} {}", message);
        }
    }

    /// Log success.
    pub fn success(&self, message: impl Display) {
        if self.enabled(LogLevel::Info) {
            eprintln!("{GREEN}[ok]{RESET} {}", message);
        }
    }

    /// Log an error.
    pub fn error(&self, message: impl Display) {
        if self.enabled(LogLevel::Info) {
            eprintln!("{RED}{BOLD}[error]{RESET} {}", message);
        }
    }

    /// Log a warning. Printed at every level.
    pub fn warn(&self, message: impl Display) {
        eprintln!("{YELLOW}[warn]{RESET} {}", message);
    }
}

/// Truncate and clean string for display.
pub fn preview(s: &str, max: usize) -> String {
    let clean: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let trimmed = clean.trim();
    if trimmed.chars().count() > max {
        let head: String = trimmed.chars().take(max).collect();
        format!("{head}...")
    } else {
        trimmed.to_string()
    }
}
