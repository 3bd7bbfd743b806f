use std::io::Read;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use function_common::{FunctionError, Outcome};
use serde::Serialize;
use serde_json::Value;

/// Value of `--input` that means "read the JSON document from stdin".
pub const STDIN_SENTINEL: &str = "-";

/// Default for `--param2`.
pub const DEFAULT_PARAM2: &str = "default value";

/// Fixed message of every successful invocation.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Function template
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "flag_function", version)]
pub struct FlagArgs {
    /// JSON input data (use "-" for stdin)
    #[arg(long)]
    pub input: String,

    /// Example additional parameter
    #[arg(long, default_value = DEFAULT_PARAM2)]
    pub param2: String,
}

/// `{"message": "Success", "data": <input>, "param2": <param2>}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagOutput {
    pub message: String,
    pub data: Value,
    pub param2: String,
}

/// Resolve `--input`: the sentinel parses `stdin` as one JSON document, any
/// other value is taken literally as a string.
pub fn acquire<R: Read>(input: &str, stdin: R) -> Outcome<Value> {
    if input == STDIN_SENTINEL {
        let raw = function_common::read_from(stdin)?;
        function_common::parse_input(&raw)
    } else {
        Ok(Value::String(input.to_string()))
    }
}

/// Function logic. Replace the echo with real work; keep the signature.
pub fn compute(data: Value, param2: String) -> Result<FlagOutput> {
    Ok(FlagOutput {
        message: SUCCESS_MESSAGE.to_string(),
        data,
        param2,
    })
}

/// Acquire the input and run [`compute`].
pub fn execute<R: Read>(args: &FlagArgs, stdin: R) -> Outcome<FlagOutput> {
    let data = acquire(&args.input, stdin)?;
    compute(data, args.param2.clone()).map_err(FunctionError::from)
}

/// Whether a parse "error" is really `--help` or `--version` output.
pub fn is_informational(err: &clap::Error) -> bool {
    matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

/// Argument errors are reported like any other failed invocation.
pub fn usage_error(err: &clap::Error) -> FunctionError {
    FunctionError::new(err.to_string().trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> std::result::Result<FlagArgs, clap::Error> {
        FlagArgs::try_parse_from(std::iter::once("flag_function").chain(args.iter().copied()))
    }

    #[test]
    fn test_param2_defaults() {
        let args = parse(&["--input", "abc"]).unwrap();
        assert_eq!(args.input, "abc");
        assert_eq!(args.param2, DEFAULT_PARAM2);
    }

    #[test]
    fn test_sentinel_is_a_value() {
        let args = parse(&["--input", "-", "--param2", "p"]).unwrap();
        assert_eq!(args.input, STDIN_SENTINEL);
        assert_eq!(args.param2, "p");
    }

    #[test]
    fn test_missing_input_is_usage_error() {
        let err = parse(&[]).unwrap_err();
        assert!(!is_informational(&err));
        assert!(usage_error(&err).error.contains("--input"));
    }

    #[test]
    fn test_help_is_informational() {
        let err = parse(&["--help"]).unwrap_err();
        assert!(is_informational(&err));
    }

    #[test]
    fn test_literal_input_not_parsed() {
        let data = acquire("{\"a\": 1}", std::io::empty()).unwrap();
        assert_eq!(data, json!("{\"a\": 1}"));
    }

    #[test]
    fn test_stdin_input_parsed() {
        let data = acquire(STDIN_SENTINEL, "{\"a\": [1, 2]}".as_bytes()).unwrap();
        assert_eq!(data, json!({"a": [1, 2]}));
    }

    #[test]
    fn test_stdin_input_malformed() {
        let err = acquire(STDIN_SENTINEL, "{\"a\":".as_bytes()).unwrap_err();
        assert!(err.error.starts_with("Invalid JSON input:"));
    }

    #[test]
    fn test_execute_shape() {
        let args = parse(&["--input", "hello"]).unwrap();
        let out = execute(&args, std::io::empty()).unwrap();
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"message": "Success", "data": "hello", "param2": "default value"})
        );
    }
}
