use std::io::Write;
use std::process::{Command, Stdio};

use function_common::serde_json::{self, json, Value};

/// Run the built binary with `args` and `stdin`, returning (stdout, exit code).
fn invoke(args: &[&str], stdin: &str) -> (String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_flag_function"))
        .args(args)
        .env_remove("FUNCTION_OUTPUT_MARKER")
        .env("FUNCTION_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The binary only reads stdin for `--input -`.
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    let output = child.wait_with_output().unwrap();
    (
        String::from_utf8(output.stdout).unwrap(),
        output.status.code().unwrap(),
    )
}

#[test]
fn test_literal_input() {
    let (stdout, code) = invoke(&["--input", "hello"], "");
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "{\"message\":\"Success\",\"data\":\"hello\",\"param2\":\"default value\"}\n"
    );
}

#[test]
fn test_stdin_input_with_param2() {
    let (stdout, code) = invoke(&["--input", "-", "--param2", "custom"], r#"{"b": 2, "a": [1]}"#);
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "{\"message\":\"Success\",\"data\":{\"b\":2,\"a\":[1]},\"param2\":\"custom\"}\n"
    );
}

#[test]
fn test_stdin_input_malformed() {
    let (stdout, code) = invoke(&["--input", "-"], "not json");
    assert_eq!(code, 1);
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert!(value.get("message").is_none());
    assert!(value["error"].as_str().unwrap().starts_with("Invalid JSON input:"));
}

#[test]
fn test_missing_input_flag() {
    let (stdout, code) = invoke(&[], "");
    assert_eq!(code, 1);
    assert_eq!(stdout.lines().count(), 1);
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert!(value["error"].as_str().unwrap().contains("--input"));
}

#[test]
fn test_marker_from_environment() {
    let output = Command::new(env!("CARGO_BIN_EXE_flag_function"))
        .args(["--input", "x"])
        .env("FUNCTION_OUTPUT_MARKER", "1")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let payload = stdout.strip_prefix("$%*%$Output:").unwrap();
    let value: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(
        value,
        json!({"message": "Success", "data": "x", "param2": "default value"})
    );
}

#[test]
fn test_identical_input_identical_output() {
    let args = ["--input", "-", "--param2", "p"];
    assert_eq!(invoke(&args, "[1, 2, 3]"), invoke(&args, "[1, 2, 3]"));
}

#[test]
fn test_help_exits_zero() {
    let (stdout, code) = invoke(&["--help"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("--input"));
    assert!(!stdout.contains("{\"error\""));
}
