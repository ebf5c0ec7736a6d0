//! Binary and logical operator evaluation

use crate::ast::{BinaryOp, Expr, LogicalOp};
use crate::error::type_name;
use crate::value::coerce::{to_int32, to_uint32};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate both operands left to right, then apply the operator.
pub fn eval_binary_expr(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let left_val = left.eval(env, ctx)?;
    let right_val = right.eval(env, ctx)?;
    apply_binary(op, &left_val, &right_val)
}

/// Apply a binary operator to two values.
///
/// Shared by binary expressions and compound assignment.
pub fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem | BinaryOp::Pow => {
            eval_arithmetic(op, left, right)
        }

        BinaryOp::Eq => Ok(Value::Bool(left.loose_equals(right))),
        BinaryOp::NotEq => Ok(Value::Bool(!left.loose_equals(right))),
        BinaryOp::StrictEq => Ok(Value::Bool(left.strict_equals(right))),
        BinaryOp::StrictNotEq => Ok(Value::Bool(!left.strict_equals(right))),

        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_compare(op, left, right)
        }

        BinaryOp::BitAnd
        | BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::Shl
        | BinaryOp::Shr
        | BinaryOp::UShr => eval_bitwise(op, left, right),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

/// `+`: concatenation when either side is a string, numeric addition
/// otherwise.
pub fn eval_add(left: &Value, right: &Value) -> Result<Value, EvalError> {
    if left.is_string() || right.is_string() {
        let mut s = left.to_display_string();
        s.push_str(&right.to_display_string());
        return Ok(Value::string(s));
    }
    let l = numeric_operand(left, "+")?;
    let r = numeric_operand(right, "+")?;
    Ok(Value::Number(l + r))
}

fn eval_arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let symbol = op.to_string();
    let l = numeric_operand(left, &symbol)?;
    let r = numeric_operand(right, &symbol)?;
    let result = match op {
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        // IEEE: x/0 is ±Infinity, 0/0 is NaN
        BinaryOp::Div => l / r,
        // fmod: NaN for a zero divisor or an infinite dividend
        BinaryOp::Rem => l % r,
        BinaryOp::Pow => eval_pow(l, r),
        _ => unreachable!(),
    };
    Ok(Value::Number(result))
}

fn eval_pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Coerce an arithmetic operand to a number.
///
/// Only primitives coerce; anything else is a `TypeMismatch`.
pub fn numeric_operand(value: &Value, op: &str) -> Result<f64, EvalError> {
    value.to_number().ok_or_else(|| EvalError::TypeMismatch {
        message: format!("cannot use {} as a number in `{}`", type_name(value), op),
        span: None,
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════

fn eval_compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    if let (Value::String(a), Value::String(b)) = (left, right) {
        // Byte order of UTF-8 is code point order
        let result = match op {
            BinaryOp::Lt => a < b,
            BinaryOp::LtEq => a <= b,
            BinaryOp::Gt => a > b,
            BinaryOp::GtEq => a >= b,
            _ => unreachable!(),
        };
        return Ok(Value::Bool(result));
    }

    let l = ordered_operand(op, left, right)?;
    let r = ordered_operand(op, right, left)?;
    // A NaN operand makes every comparison false
    let result = match op {
        BinaryOp::Lt => l < r,
        BinaryOp::LtEq => l < r || l == r,
        BinaryOp::Gt => l > r,
        BinaryOp::GtEq => l > r || l == r,
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}

fn ordered_operand(op: BinaryOp, value: &Value, other: &Value) -> Result<f64, EvalError> {
    value
        .to_number()
        .ok_or_else(|| unsupported(op.to_string(), value, other))
}

// ═══════════════════════════════════════════════════════════════════════
// Bitwise
// ═══════════════════════════════════════════════════════════════════════

fn eval_bitwise(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let l = ordered_operand(op, left, right)?;
    let r = ordered_operand(op, right, left)?;
    let shift = to_uint32(r) & 31;
    let result = match op {
        BinaryOp::BitAnd => f64::from(to_int32(l) & to_int32(r)),
        BinaryOp::BitOr => f64::from(to_int32(l) | to_int32(r)),
        BinaryOp::BitXor => f64::from(to_int32(l) ^ to_int32(r)),
        BinaryOp::Shl => f64::from(to_int32(l).wrapping_shl(shift)),
        BinaryOp::Shr => f64::from(to_int32(l) >> shift),
        BinaryOp::UShr => f64::from(to_uint32(l) >> shift),
        _ => unreachable!(),
    };
    Ok(Value::Number(result))
}

fn unsupported(op: String, left: &Value, right: &Value) -> EvalError {
    EvalError::UnsupportedOperator {
        op,
        operands: format!("{} and {}", type_name(left), type_name(right)),
        span: None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Logical (short-circuit)
// ═══════════════════════════════════════════════════════════════════════

/// `&&`, `||`, `??`: the right operand is evaluated only when needed, and
/// the result is one of the operand values.
pub fn eval_logical(
    op: LogicalOp,
    left: &Expr,
    right: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let left_val = left.eval(env, ctx)?;
    let short_circuit = match op {
        LogicalOp::And => !left_val.is_truthy(),
        LogicalOp::Or => left_val.is_truthy(),
        LogicalOp::Nullish => !left_val.is_null(),
    };
    if short_circuit {
        Ok(left_val)
    } else {
        right.eval(env, ctx)
    }
}
