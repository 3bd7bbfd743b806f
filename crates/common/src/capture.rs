// crates/common/src/capture.rs

//! Caller side of the output convention: recover the result of a function
//! from the text it wrote to stdout.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::{Emit, OUTPUT_MARKER};

/// What a function reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Success(Value),
    Failure(String),
}

impl Reply {
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// Classify a bare JSON document.
    ///
    /// An object with a string `error` field and no `message` field is a failure.
    pub fn from_value(value: Value) -> Self {
        match error_message(&value) {
            Some(msg) => Reply::Failure(msg.to_string()),
            None => Reply::Success(value),
        }
    }
}

/// The message of an `{"error": ...}` object, if `value` is one.
pub fn error_message(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;
    if obj.contains_key("message") {
        return None;
    }
    obj.get("error")?.as_str()
}

/// Parse the stdout of a function.
///
/// With [`Emit::Marked`] the last line starting with the marker carries the
/// result and anything else is free-form output; when no line is marked the
/// last non-empty line must be an error object. With [`Emit::Plain`] the last
/// non-empty line is the result.
pub fn parse_reply(stdout: &str, emit: Emit) -> Result<Reply> {
    if emit == Emit::Marked {
        if let Some(payload) = stdout
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix(OUTPUT_MARKER))
        {
            let value: Value =
                serde_json::from_str(payload).context("marked output is not valid JSON")?;
            return Ok(Reply::Success(value));
        }
    }

    let line = last_line(stdout).context("function produced no output")?;
    let value: Value = serde_json::from_str(line)
        .with_context(|| format!("function output is not valid JSON: {line}"))?;

    match (emit, Reply::from_value(value)) {
        (Emit::Marked, Reply::Success(_)) => {
            anyhow::bail!("no line starts with {OUTPUT_MARKER} and the last line is not an error")
        }
        (_, reply) => Ok(reply),
    }
}

fn last_line(stdout: &str) -> Option<&str> {
    stdout.lines().rev().map(str::trim).find(|l| !l.is_empty())
}
