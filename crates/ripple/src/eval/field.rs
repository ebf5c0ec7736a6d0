//! Member and index access

use std::rc::Rc;

use crate::ast::Expr;
use crate::error::type_name;
use crate::value::{BoundMethod, ListRef};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate `object.property`.
pub fn eval_member(
    object: &Expr,
    property: &str,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let object = object.eval(env, ctx)?;
    get_member(&object, property)
}

/// Evaluate `object[index]`.
pub fn eval_index(
    object: &Expr,
    index: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let object = object.eval(env, ctx)?;
    let key = index.eval(env, ctx)?;
    get_index(&object, &key)
}

// ═══════════════════════════════════════════════════════════════════════
// Reads
// ═══════════════════════════════════════════════════════════════════════

/// Read a named property.
///
/// Missing record keys read as `null`. Host objects expose plain
/// properties first, then methods as bound method values.
pub fn get_member(object: &Value, property: &str) -> Result<Value, EvalError> {
    match object {
        Value::Null => Err(EvalError::NullPropertyAccess {
            property: property.to_string(),
            span: None,
        }),
        Value::Record(fields) => Ok(fields.borrow().get(property).cloned().unwrap_or(Value::Null)),
        Value::List(items) => {
            if property == "length" {
                return Ok(Value::Number(items.borrow().len() as f64));
            }
            Ok(array_index(property)
                .and_then(|i| items.borrow().get(i).cloned())
                .unwrap_or(Value::Null))
        }
        Value::String(s) => {
            if property == "length" {
                return Ok(Value::Number(s.chars().count() as f64));
            }
            Ok(array_index(property)
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::string(c.to_string()))
                .unwrap_or(Value::Null))
        }
        Value::Host(host) => {
            if let Some(value) = host.get_property(property) {
                return Ok(value);
            }
            if host.has_method(property) {
                return Ok(Value::BoundMethod(BoundMethod {
                    receiver: Rc::clone(host),
                    method: property.to_string(),
                }));
            }
            Ok(Value::Null)
        }
        _ => Ok(Value::Null),
    }
}

/// Read `object[key]`: numeric keys index lists and strings, anything else
/// is a property name.
pub fn get_index(object: &Value, key: &Value) -> Result<Value, EvalError> {
    match (object, key) {
        (Value::List(items), Value::Number(n)) => Ok(number_index(*n)
            .and_then(|i| items.borrow().get(i).cloned())
            .unwrap_or(Value::Null)),
        (Value::String(s), Value::Number(n)) => Ok(number_index(*n)
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::string(c.to_string()))
            .unwrap_or(Value::Null)),
        _ => get_member(object, &key.to_display_string()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Writes
// ═══════════════════════════════════════════════════════════════════════

/// Write a named property in place.
pub fn set_member(object: &Value, property: &str, value: Value) -> Result<(), EvalError> {
    match object {
        Value::Null => Err(EvalError::NullPropertyAccess {
            property: property.to_string(),
            span: None,
        }),
        Value::Record(fields) => {
            fields.borrow_mut().insert(property.to_string(), value);
            Ok(())
        }
        Value::List(items) => match array_index(property) {
            Some(i) => list_set(items, i, value),
            None => Err(cannot_set(object, property)),
        },
        Value::Host(host) => host
            .set_property(property, value)
            .map_err(|message| EvalError::HostError {
                name: host.type_name().to_string(),
                message,
                span: None,
            }),
        _ => Err(cannot_set(object, property)),
    }
}

/// Write `object[key]` in place.
pub fn set_index(object: &Value, key: &Value, value: Value) -> Result<(), EvalError> {
    if let (Value::List(items), Value::Number(n)) = (object, key) {
        return match number_index(*n) {
            Some(i) => list_set(items, i, value),
            None => Err(EvalError::TypeMismatch {
                message: format!("invalid list index {}", key),
                span: None,
            }),
        };
    }
    set_member(object, &key.to_display_string(), value)
}

/// Lists never grow past this many elements.
pub const MAX_LIST_LEN: usize = 1 << 24;

/// Store at `index`, padding with `null` when writing past the end.
fn list_set(items: &ListRef, index: usize, value: Value) -> Result<(), EvalError> {
    let mut items = items.borrow_mut();
    if index >= items.len() {
        let len = index
            .checked_add(1)
            .filter(|len| *len <= MAX_LIST_LEN)
            .ok_or_else(|| EvalError::TypeMismatch {
                message: format!("list index {} exceeds limit {}", index, MAX_LIST_LEN - 1),
                span: None,
            })?;
        items.resize(len, Value::Null);
    }
    items[index] = value;
    Ok(())
}

fn cannot_set(object: &Value, property: &str) -> EvalError {
    EvalError::TypeMismatch {
        message: format!("cannot set property `{}` on {}", property, type_name(object)),
        span: None,
    }
}

fn number_index(n: f64) -> Option<usize> {
    if n >= 0.0 && n.fract() == 0.0 && n < u32::MAX as f64 {
        Some(n as usize)
    } else {
        None
    }
}

fn array_index(property: &str) -> Option<usize> {
    if property.is_empty() || !property.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    property.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Value {
        Value::record(vec![("a".to_string(), Value::Number(1.0))])
    }

    #[test]
    fn test_record_access() {
        let r = record();
        assert_eq!(get_member(&r, "a").unwrap(), Value::Number(1.0));
        assert_eq!(get_member(&r, "missing").unwrap(), Value::Null);
    }

    #[test]
    fn test_null_property_access() {
        assert!(matches!(
            get_member(&Value::Null, "x"),
            Err(EvalError::NullPropertyAccess { ref property, .. }) if property == "x"
        ));
        assert!(matches!(
            set_member(&Value::Null, "x", Value::Null),
            Err(EvalError::NullPropertyAccess { .. })
        ));
    }

    #[test]
    fn test_length() {
        let list = Value::list(vec![Value::Null, Value::Null]);
        assert_eq!(get_member(&list, "length").unwrap(), Value::Number(2.0));
        assert_eq!(
            get_member(&Value::string("héllo"), "length").unwrap(),
            Value::Number(5.0)
        );
    }

    #[test]
    fn test_index_reads() {
        let list = Value::list(vec![Value::string("x"), Value::string("y")]);
        assert_eq!(get_index(&list, &Value::Number(1.0)).unwrap(), Value::string("y"));
        assert_eq!(get_index(&list, &Value::string("0")).unwrap(), Value::string("x"));
        assert_eq!(get_index(&list, &Value::Number(5.0)).unwrap(), Value::Null);
        assert_eq!(
            get_index(&Value::string("abc"), &Value::Number(2.0)).unwrap(),
            Value::string("c")
        );
    }

    #[test]
    fn test_writes_mutate_in_place() {
        let r = record();
        let alias = r.clone();
        set_member(&r, "b", Value::Number(2.0)).unwrap();
        assert_eq!(get_member(&alias, "b").unwrap(), Value::Number(2.0));

        let list = Value::list(vec![]);
        set_index(&list, &Value::Number(2.0), Value::Bool(true)).unwrap();
        assert_eq!(
            list,
            Value::list(vec![Value::Null, Value::Null, Value::Bool(true)])
        );
    }

    #[test]
    fn test_set_on_primitive_fails() {
        assert!(matches!(
            set_member(&Value::Number(1.0), "x", Value::Null),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_list_write_limit() {
        let list = Value::list(vec![]);
        assert!(matches!(
            set_member(&list, "18446744073709551615", Value::Null),
            Err(EvalError::TypeMismatch { .. })
        ));
        assert!(matches!(
            set_index(&list, &Value::Number(MAX_LIST_LEN as f64), Value::Null),
            Err(EvalError::TypeMismatch { .. })
        ));
        assert_eq!(list, Value::list(vec![]));
    }
}
