//! Unary operators and `++`/`--`

use crate::ast::{Expr, ExprKind, UnaryOp, UpdateOp};
use crate::error::type_name;
use crate::value::coerce::to_int32;
use crate::{Environment, EvalContext, EvalError, Value};

use super::assign::assign_variable;
use super::binary::numeric_operand;
use super::path::eval_ident;
use super::Evaluate;

/// Evaluate a prefix operator.
pub fn eval_unary(
    op: UnaryOp,
    operand: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    // typeof of an undeclared name is "undefined", not an error
    if let (UnaryOp::TypeOf, ExprKind::Ident(name)) = (op, &operand.kind) {
        if !env.contains(name) && ctx.globals.get(name).is_none() {
            return Ok(Value::string("undefined"));
        }
    }

    let value = operand.eval(env, ctx)?;
    apply_unary(op, &value)
}

/// Apply a prefix operator to a value.
pub fn apply_unary(op: UnaryOp, value: &Value) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Neg => Ok(Value::Number(-numeric_operand(value, "-")?)),
        UnaryOp::Plus => Ok(Value::Number(numeric_operand(value, "+")?)),
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
        UnaryOp::BitNot => {
            let n = value
                .to_number()
                .ok_or_else(|| EvalError::UnsupportedOperator {
                    op: op.to_string(),
                    operands: type_name(value).to_string(),
                    span: None,
                })?;
            Ok(Value::Number(f64::from(!to_int32(n))))
        }
        UnaryOp::TypeOf => Ok(Value::string(value.type_of())),
        UnaryOp::Void => Ok(Value::Null),
    }
}

/// Evaluate `++x`, `x++`, `--x`, `x--`.
///
/// The operand must be a plain identifier bound to a number. The write goes
/// through normal assignment, so `const` bindings are rejected and
/// observers fire.
pub fn eval_update(
    op: UpdateOp,
    prefix: bool,
    target: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let ExprKind::Ident(name) = &target.kind else {
        return Err(EvalError::TypeMismatch {
            message: format!("`{}` needs a variable operand", op),
            span: None,
        });
    };

    let old = match eval_ident(name, env, ctx)? {
        Value::Number(n) => n,
        other => {
            return Err(EvalError::TypeMismatch {
                message: format!(
                    "`{}` needs a number, but `{}` is {}",
                    op,
                    name,
                    type_name(&other)
                ),
                span: None,
            })
        }
    };

    let new = match op {
        UpdateOp::Increment => old + 1.0,
        UpdateOp::Decrement => old - 1.0,
    };
    assign_variable(name, Value::Number(new), env, ctx)?;

    Ok(Value::Number(if prefix { new } else { old }))
}
