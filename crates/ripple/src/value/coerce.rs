//! Type coercion: truthiness, number/string conversion, equality

use std::rc::Rc;

use super::Value;

/// Format a number the way scripts see it.
///
/// Integral values print without a fractional part (`3`, not `3.0`);
/// `NaN` and the infinities print by name. Magnitudes of `1e21` and above,
/// or below `1e-6`, use exponent form with a signed exponent (`1e+21`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let name = if n > 0.0 { "Infinity" } else { "-Infinity" };
        name.to_string()
    } else if n == 0.0 {
        // Covers -0 as well
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn exponent_form(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

/// Convert a string to a number.
///
/// Surrounding whitespace is ignored and the empty string is `0`. Accepts
/// decimal literals, `Infinity` (optionally signed), and `0x` hex; anything
/// else is `NaN`.
pub fn parse_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }
    // Rust accepts spellings like "inf" and "nan" that scripts must not
    let decimal = t
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

impl Value {
    /// Truthiness used by conditions and logical operators.
    ///
    /// `null`, `false`, `0`, `NaN` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Numeric coercion of a primitive.
    ///
    /// Returns `None` for lists, records, callables and host objects, which
    /// have no numeric form.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Null => Some(0.0),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Some(*n),
            Value::String(s) => Some(parse_number(s)),
            _ => None,
        }
    }

    /// Whether the value coerces to a number.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }

    /// String form used by concatenation, `throw`, and property keys.
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }

    /// Strict equality (`===`): same type and same value, no coercion.
    ///
    /// Lists, records and callables compare by identity. `NaN` is not equal
    /// to itself.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(&a.func, &b.func),
            (Value::BoundMethod(a), Value::BoundMethod(b)) => {
                same_host(&a.receiver, &b.receiver) && a.method == b.method
            }
            (Value::Host(a), Value::Host(b)) => same_host(a, b),
            _ => false,
        }
    }

    /// Loose equality (`==`): coerces operands to a common form first.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Number(a), Value::String(s)) | (Value::String(s), Value::Number(a)) => {
                *a == parse_number(s)
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Bool(b), other) | (other, Value::Bool(b)) => {
                Value::Number(if *b { 1.0 } else { 0.0 }).loose_equals(other)
            }
            (Value::List(_) | Value::Record(_), Value::Number(_) | Value::String(_)) => {
                Value::string(self.to_string()).loose_equals(other)
            }
            (Value::Number(_) | Value::String(_), Value::List(_) | Value::Record(_)) => {
                self.loose_equals(&Value::string(other.to_string()))
            }
            _ => self.strict_equals(other),
        }
    }

    /// Change detection used by assignment: strict equality, except that
    /// `NaN` counts as unchanged when replaced by `NaN`.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }
}

/// ToInt32: wrap a double into the signed 32-bit range.
pub(crate) fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}

/// ToUint32: wrap a double into the unsigned 32-bit range.
pub(crate) fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    let wrapped = n.trunc().rem_euclid(4_294_967_296.0);
    wrapped as u32
}

fn same_host(a: &Rc<dyn super::HostObject>, b: &Rc<dyn super::HostObject>) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}
