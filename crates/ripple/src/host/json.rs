//! The `JSON` host object

use crate::value::HostObject;
use crate::Value;

use super::expect_args;

/// The `JSON` global: `stringify` and `parse` backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Json {
    fn stringify(args: &[Value]) -> Result<Value, String> {
        expect_args("JSON.stringify", args, 1)?;
        let json = args[0].to_json();
        // Third argument: indentation, as in JSON.stringify(v, null, 2)
        let pretty = args.get(2).map(Value::is_truthy).unwrap_or(false);
        let text = if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        }
        .map_err(|e| e.to_string())?;
        Ok(Value::string(text))
    }

    fn parse(args: &[Value]) -> Result<Value, String> {
        expect_args("JSON.parse", args, 1)?;
        let text = args[0].to_display_string();
        let json: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| format!("invalid JSON: {}", e))?;
        Ok(Value::from_json(&json))
    }
}

impl HostObject for Json {
    fn type_name(&self) -> &str {
        "JSON"
    }

    fn has_method(&self, name: &str) -> bool {
        matches!(name, "stringify" | "parse")
    }

    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, String> {
        match method {
            "stringify" => Self::stringify(args),
            "parse" => Self::parse(args),
            other => Err(format!("JSON.{} is not a function", other)),
        }
    }
}
