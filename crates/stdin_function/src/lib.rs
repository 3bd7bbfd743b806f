use anyhow::Result;
use function_common::{FunctionError, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value used for `optionalParam` when the caller leaves it out.
pub const DEFAULT_OPTIONAL: &str = "default value";

/// Fixed message of every successful invocation.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Input object read from stdin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StdinInput {
    /// Must be present; any JSON value, `null` included.
    pub required_param: Value,
    /// Used verbatim when present.
    #[serde(default = "default_optional")]
    pub optional_param: Value,
}

fn default_optional() -> Value {
    Value::String(DEFAULT_OPTIONAL.to_string())
}

impl StdinInput {
    /// Read the input from an already parsed document, which must be an object.
    pub fn from_value(value: Value) -> Outcome<Self> {
        if !value.is_object() {
            return Err(FunctionError::new(format!(
                "Invalid input: expected a JSON object, found {}",
                kind(&value)
            )));
        }
        serde_json::from_value(value).map_err(|e| FunctionError::new(format!("Invalid input: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EchoData {
    pub required: Value,
    pub optional: Value,
}

/// `{"message": "Success", "data": {"required": ..., "optional": ...}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StdinOutput {
    pub message: String,
    pub data: EchoData,
}

/// Function logic. Replace the echo with real work; keep the signature.
pub fn compute(input: StdinInput) -> Result<StdinOutput> {
    Ok(StdinOutput {
        message: SUCCESS_MESSAGE.to_string(),
        data: EchoData {
            required: input.required_param,
            optional: input.optional_param,
        },
    })
}

/// Entry point handed to the runner.
pub fn handle(input: Value) -> Result<StdinOutput> {
    let input = StdinInput::from_value(input)?;
    compute(input)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
