//! Value tests

use pretty_assertions::assert_eq;
use ripple::ast::build::*;
use ripple::ast::DeclKind;
use ripple::{Console, EvalContext, EvalError, HostObject, Interpreter, Value};

// ═══════════════════════════════════════════════════════════════════════
// Coercion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_truthiness() {
    let falsy = [
        Value::Null,
        Value::Bool(false),
        Value::Number(0.0),
        Value::Number(f64::NAN),
        Value::string(""),
    ];
    for value in falsy {
        assert!(!value.is_truthy(), "{:?} should be falsy", value);
    }

    let truthy = [
        Value::Number(-1.0),
        Value::string("0"),
        Value::list(vec![]),
        Value::record(vec![]),
    ];
    for value in truthy {
        assert!(value.is_truthy(), "{:?} should be truthy", value);
    }
}

#[test]
fn test_to_number() {
    assert_eq!(Value::string(" 12 ").to_number(), Some(12.0));
    assert_eq!(Value::string("").to_number(), Some(0.0));
    assert_eq!(Value::Bool(true).to_number(), Some(1.0));
    assert_eq!(Value::Null.to_number(), Some(0.0));
    assert!(Value::string("12px").to_number().unwrap().is_nan());
    assert_eq!(Value::list(vec![]).to_number(), None);
}

#[test]
fn test_display_strings() {
    assert_eq!(Value::Number(1.5).to_display_string(), "1.5");
    assert_eq!(Value::Number(-0.0).to_display_string(), "0");
    assert_eq!(Value::Number(f64::INFINITY).to_display_string(), "Infinity");
    assert_eq!(Value::Number(f64::NAN).to_display_string(), "NaN");
    assert_eq!(
        Value::list(vec![Value::Number(1.0), Value::string("a")]).to_display_string(),
        "1,a"
    );
}

#[test]
fn test_type_of() {
    assert_eq!(Value::Null.type_of(), "object");
    assert_eq!(Value::string("s").type_of(), "string");
    assert_eq!(Value::record(vec![]).type_of(), "object");
    assert_eq!(
        Value::builtin("f", 0, |_| Ok(Value::Null)).type_of(),
        "function"
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_strict_equality_has_no_coercion() {
    assert!(Value::Number(1.0).strict_equals(&Value::Number(1.0)));
    assert!(!Value::Number(1.0).strict_equals(&Value::string("1")));
    assert!(!Value::Number(f64::NAN).strict_equals(&Value::Number(f64::NAN)));
}

#[test]
fn test_loose_equality_coerces() {
    assert!(Value::Number(0.0).loose_equals(&Value::string("")));
    assert!(Value::Bool(true).loose_equals(&Value::Number(1.0)));
    assert!(Value::Bool(true).loose_equals(&Value::string("1")));
    assert!(!Value::Null.loose_equals(&Value::Number(0.0)));
    assert!(Value::list(vec![Value::Number(1.0)]).loose_equals(&Value::string("1")));
}

#[test]
fn test_compound_identity() {
    let list = Value::list(vec![]);
    let alias = list.clone();
    assert!(list.strict_equals(&alias));
    assert!(!list.strict_equals(&Value::list(vec![])));
    // Structural equality for host-side comparisons
    assert_eq!(list, Value::list(vec![]));
}

#[test]
fn test_same_value_treats_nan_as_unchanged() {
    assert!(Value::Number(f64::NAN).same_value(&Value::Number(f64::NAN)));
    assert!(!Value::Number(1.0).same_value(&Value::string("1")));
}

// ═══════════════════════════════════════════════════════════════════════
// JSON
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_json_conversion_keeps_key_order() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"z": 1, "a": [true, null]}"#).unwrap();
    let value = Value::from_json(&json);
    assert_eq!(value.inspect(), "{ z: 1, a: [true, null] }");
    assert_eq!(
        serde_json::to_string(&value.to_json()).unwrap(),
        r#"{"z":1,"a":[true,null]}"#
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Host Objects
// ═══════════════════════════════════════════════════════════════════════

/// A host object exposing a fixed range of numbers.
struct Range {
    end: u32,
}

impl HostObject for Range {
    fn type_name(&self) -> &str {
        "Range"
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        (name == "end").then(|| Value::Number(f64::from(self.end)))
    }

    fn has_method(&self, name: &str) -> bool {
        name == "contains"
    }

    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, String> {
        match (method, args.first()) {
            ("contains", Some(Value::Number(n))) => {
                Ok(Value::Bool(*n >= 0.0 && *n < f64::from(self.end)))
            }
            ("contains", _) => Err("contains expects a number".to_string()),
            _ => Err(format!("unknown method {}", method)),
        }
    }

    fn enumerate(&self) -> Option<Vec<Value>> {
        Some((0..self.end).map(|i| Value::Number(f64::from(i))).collect())
    }
}

fn with_range() -> (Interpreter, std::rc::Rc<std::cell::RefCell<Vec<String>>>) {
    let console = Console::buffered();
    let lines = console.lines();
    let ctx = EvalContext::new()
        .with_console(console)
        .with_global("range", Value::host(Range { end: 3 }));
    (Interpreter::with_context(ctx), lines)
}

#[test]
fn test_host_object_properties_and_methods() {
    let (mut interp, _) = with_range();
    let value = interp
        .execute(&program(vec![expr_stmt(array(vec![
            member(ident("range"), "end"),
            method_call(ident("range"), "contains", vec![num(2.0)]),
            member(ident("range"), "missing"),
        ]))]))
        .unwrap();
    assert_eq!(
        value,
        Value::list(vec![Value::Number(3.0), Value::Bool(true), Value::Null])
    );
}

#[test]
fn test_host_method_error_is_host_error() {
    let (mut interp, _) = with_range();
    let err = interp
        .execute(&program(vec![expr_stmt(method_call(
            ident("range"),
            "contains",
            vec![string("x")],
        ))]))
        .unwrap_err();
    assert_eq!(err.to_string(), "Range.contains: contains expects a number");
}

#[test]
fn test_host_object_is_iterable() {
    let (mut interp, lines) = with_range();
    interp
        .run(&program(vec![for_of(
            Some(DeclKind::Const),
            "i",
            ident("range"),
            block(vec![log(vec![ident("i")])]),
        )]))
        .unwrap();
    assert_eq!(*lines.borrow(), vec!["0", "1", "2"]);
}

#[test]
fn test_console_is_not_iterable() {
    let (mut interp, _) = with_range();
    let err = interp
        .execute(&program(vec![for_of(
            None,
            "x",
            ident("console"),
            block(vec![]),
        )]))
        .unwrap_err();
    assert!(matches!(
        err,
        EvalError::NotIterable { ref type_name, .. } if type_name == "console"
    ));
}
