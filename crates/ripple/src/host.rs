//! Host globals: values the embedding host exposes to every script

mod console;
mod json;

pub use console::{Console, ConsoleOutput};
pub use json::Json;

use indexmap::IndexMap;

use crate::Value;

/// Fixed table of host-provided globals.
///
/// Consulted only after environment lookup fails, so user bindings always
/// shadow host globals.
#[derive(Debug, Clone, Default)]
pub struct HostGlobals {
    values: IndexMap<String, Value>,
}

impl HostGlobals {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table: `console`, `JSON`, `undefined`, `NaN`, `Infinity`.
    pub fn standard(console: Console) -> Self {
        let mut globals = Self::new();
        globals.register("console", Value::host(console));
        globals.register("JSON", Value::host(Json));
        globals.register("undefined", Value::Null);
        globals.register("NaN", Value::Number(f64::NAN));
        globals.register("Infinity", Value::Number(f64::INFINITY));
        globals
    }

    /// Add or replace a global.
    pub fn register(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Look up a global.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }
}

/// Check a builtin argument list against a fixed count.
pub(crate) fn expect_args(name: &str, args: &[Value], min: usize) -> Result<(), String> {
    if args.len() < min {
        return Err(format!(
            "{} expects at least {} argument(s), got {}",
            name,
            min,
            args.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_globals() {
        let globals = HostGlobals::standard(Console::stdout());
        assert_eq!(
            globals.names(),
            vec!["console", "JSON", "undefined", "NaN", "Infinity"]
        );
        assert_eq!(globals.get("undefined"), Some(Value::Null));
        assert!(globals.get("missing").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut globals = HostGlobals::new();
        globals.register("x", Value::Number(1.0));
        globals.register("x", Value::Number(2.0));
        assert_eq!(globals.get("x"), Some(Value::Number(2.0)));
        assert_eq!(globals.names().len(), 1);
    }
}
