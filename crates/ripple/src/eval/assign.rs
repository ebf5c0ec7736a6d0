//! Assignment evaluation

use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::{Environment, EvalContext, EvalError, Value};

use super::binary::apply_binary;
use super::field::{get_index, get_member, set_index, set_member};
use super::observe::notify;
use super::path::eval_ident;
use super::Evaluate;

/// Evaluate `target = value` or `target op= value`.
///
/// The result is the assigned value.
pub fn eval_assign(
    op: Option<BinaryOp>,
    target: &Expr,
    value: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    match &target.kind {
        ExprKind::Ident(name) => {
            let new_value = match op {
                None => value.eval(env, ctx)?,
                Some(op) => {
                    let current = eval_ident(name, env, ctx)?;
                    let rhs = value.eval(env, ctx)?;
                    apply_binary(op, &current, &rhs)?
                }
            };
            assign_variable(name, new_value.clone(), env, ctx)?;
            Ok(new_value)
        }

        ExprKind::Member { object, property } => {
            let object = object.eval(env, ctx)?;
            let new_value = match op {
                None => value.eval(env, ctx)?,
                Some(op) => {
                    let current = get_member(&object, property)?;
                    let rhs = value.eval(env, ctx)?;
                    apply_binary(op, &current, &rhs)?
                }
            };
            set_member(&object, property, new_value.clone())?;
            Ok(new_value)
        }

        ExprKind::Index { object, index } => {
            let object = object.eval(env, ctx)?;
            let key = index.eval(env, ctx)?;
            let new_value = match op {
                None => value.eval(env, ctx)?,
                Some(op) => {
                    let current = get_index(&object, &key)?;
                    let rhs = value.eval(env, ctx)?;
                    apply_binary(op, &current, &rhs)?
                }
            };
            set_index(&object, &key, new_value.clone())?;
            Ok(new_value)
        }

        _ => Err(EvalError::TypeMismatch {
            message: "invalid assignment target".to_string(),
            span: None,
        }),
    }
}

/// Write a variable through the environment and schedule its observers
/// when the value changed.
///
/// # Errors
///
/// `UndeclaredAssignment` for unknown names, `ConstAssignment` for
/// immutable bindings.
pub fn assign_variable(
    name: &str,
    value: Value,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<(), EvalError> {
    if let Some(mutation) = env.assign(name, value)? {
        notify(mutation, env, ctx);
    }
    Ok(())
}
