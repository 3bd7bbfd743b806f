//! Common runner for JSON-in, JSON-out command-line functions.
//!
//! This crate provides helpers for:
//! - Reading JSON input from stdin
//! - Turning every failure into a `{"error": ...}` object
//! - Writing exactly one JSON line to stdout, optionally behind the output marker
//! - Exiting with status 0 on success and 1 on failure
//! - Reading a function's stdout back on the caller side (see [`capture`])

use std::io::{self, Read, Write};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub mod capture;
pub mod config;
pub mod log;

pub use config::RunnerConfig;
pub use log::{LogLevel, Logger};

// Re-export commonly used items
pub use anyhow;
pub use serde;
pub use serde_json;

/// Literal prefix written right before a marked success line.
pub const OUTPUT_MARKER: &str = "$%*%$Output:";

/// Exit status of a successful invocation.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status of any caught failure.
pub const EXIT_FAILURE: i32 = 1;

// ============ Error Type ============

/// Error type for a failed invocation.
///
/// Serializes to exactly `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionError {
    pub error: String,
}

impl FunctionError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }

    /// The error object as a single line of JSON.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "error": self.error }).to_string()
    }
}

impl std::fmt::Display for FunctionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for FunctionError {}

impl From<anyhow::Error> for FunctionError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(format!("{err:#}"))
    }
}

/// Result of one invocation.
pub type Outcome<T> = Result<T, FunctionError>;

// ============ Output Framing ============

/// How the success line is framed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emit {
    /// Bare JSON.
    #[default]
    Plain,
    /// JSON prefixed with [`OUTPUT_MARKER`], no separator.
    Marked,
}

impl Emit {
    /// Frame a serialized success payload.
    pub fn frame(self, json: &str) -> String {
        match self {
            Emit::Plain => json.to_string(),
            Emit::Marked => format!("{OUTPUT_MARKER}{json}"),
        }
    }
}

// ============ Input Helpers ============

/// Read everything from `reader` as UTF-8 text.
pub fn read_from<R: Read>(mut reader: R) -> Outcome<String> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| FunctionError::new(format!("Failed to read stdin: {e}")))?;
    Ok(input)
}

/// Read all of stdin.
pub fn read_stdin() -> Outcome<String> {
    read_from(io::stdin().lock())
}

/// Parse raw input text into `I`.
///
/// Malformed JSON and well-formed JSON of the wrong shape are reported
/// separately; the latter names the offending field, e.g.
/// ``Invalid input: missing field `requiredParam` ``.
pub fn parse_input<I: DeserializeOwned>(raw: &str) -> Outcome<I> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| FunctionError::new(format!("Invalid JSON input: {e}")))?;

    serde_json::from_value(value).map_err(|e| FunctionError::new(format!("Invalid input: {e}")))
}

/// Parse `raw` and hand it to `handler`.
pub fn invoke<I, O, F>(raw: &str, handler: F) -> Outcome<O>
where
    I: DeserializeOwned,
    F: FnOnce(I) -> anyhow::Result<O>,
{
    let input = parse_input::<I>(raw)?;
    handler(input).map_err(FunctionError::from)
}

// ============ Rendering ============

/// The single stdout line of an invocation and the status to exit with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub line: String,
    pub exit_code: i32,
}

impl Rendered {
    fn failure(err: &FunctionError) -> Self {
        Self {
            line: err.to_json(),
            exit_code: EXIT_FAILURE,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == EXIT_SUCCESS
    }
}

/// Render an outcome. Error lines are never marked.
pub fn render<O: Serialize>(outcome: &Outcome<O>, emit: Emit) -> Rendered {
    match outcome {
        Ok(output) => match serde_json::to_string(output) {
            Ok(json) => Rendered {
                line: emit.frame(&json),
                exit_code: EXIT_SUCCESS,
            },
            Err(e) => Rendered::failure(&FunctionError::new(format!(
                "Failed to serialize output: {e}"
            ))),
        },
        Err(err) => Rendered::failure(err),
    }
}

// ============ Process Entry Points ============

/// Run a function with automatic error handling, configured from the environment.
///
/// Reads stdin, parses it as `I`, runs `handler`, writes one line to stdout
/// and exits the process.
pub fn run<I, O, F>(handler: F) -> !
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(I) -> anyhow::Result<O>,
{
    run_with(RunnerConfig::from_env(), handler)
}

/// Same as [`run`] with an explicit configuration.
pub fn run_with<I, O, F>(config: RunnerConfig, handler: F) -> !
where
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(I) -> anyhow::Result<O>,
{
    let logger = config.logger();
    logger.info("reading input from stdin");
    let outcome = read_stdin().and_then(|raw| {
        logger.debug(format!(
            "received {} bytes: {}",
            raw.len(),
            log::preview(&raw, 120)
        ));
        invoke(&raw, handler)
    });
    finish(outcome, &config)
}

/// Write the outcome of an invocation and exit.
///
/// For functions that acquire their input themselves (e.g. from flags).
pub fn finish<O: Serialize>(outcome: Outcome<O>, config: &RunnerConfig) -> ! {
    let logger = config.logger();
    let rendered = render(&outcome, config.emit);

    if let Err(e) = write_line(&rendered.line) {
        logger.warn(format!("failed to write result to stdout: {e}"));
        std::process::exit(EXIT_FAILURE);
    }

    match &outcome {
        Ok(_) if rendered.is_success() => logger.success("invocation succeeded"),
        Ok(_) => logger.error("invocation failed: result could not be serialized"),
        Err(e) => logger.error(format!("invocation failed: {e}")),
    }
    logger.debug(format!("exit status {}", rendered.exit_code));

    std::process::exit(rendered.exit_code)
}

fn write_line(line: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{line}")?;
    out.flush()
}
