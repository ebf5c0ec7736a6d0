//! Display and Debug implementations for Value

use std::fmt;

use super::*;

/// Nesting depth past which `inspect` stops descending (guards cycles).
const MAX_INSPECT_DEPTH: usize = 8;

/// Display is the script-visible string conversion (`String(x)`).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::List(items) => {
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // Nested nulls print as empty, matching join()
                    if !matches!(item, Value::Null) {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Record(_) => write!(f, "[object Object]"),
            Value::Function(func) => write!(f, "[function {}]", func.display_name()),
            Value::Builtin(b) => write!(f, "[function {}]", b.name),
            Value::BoundMethod(m) => {
                write!(f, "[function {}.{}]", m.receiver.type_name(), m.method)
            }
            Value::Host(h) => write!(f, "[object {}]", h.type_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

impl Value {
    /// Developer-facing rendering used by `console.log` for non-strings.
    ///
    /// Strings nested in lists and records are quoted; records print as
    /// `{ key: value }`.
    pub fn inspect(&self) -> String {
        let mut out = String::new();
        inspect_into(self, 0, &mut out);
        out
    }
}

fn inspect_into(value: &Value, depth: usize, out: &mut String) {
    if depth > MAX_INSPECT_DEPTH {
        out.push_str("[...]");
        return;
    }
    match value {
        Value::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                inspect_into(item, depth + 1, out);
            }
            out.push(']');
        }
        Value::Record(fields) => {
            let fields = fields.borrow();
            if fields.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{ ");
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push_str(": ");
                inspect_into(item, depth + 1, out);
            }
            out.push_str(" }");
        }
        other => out.push_str(&other.to_string()),
    }
}
