//! List and record literals

use crate::ast::Expr;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate `[a, b, c]` left to right into a fresh list.
pub fn eval_array(
    items: &[Expr],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let values = items
        .iter()
        .map(|item| item.eval(env, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::list(values))
}

/// Evaluate `{ key: value, ... }` into a fresh record.
///
/// Keys keep source order; a repeated key keeps its first position and
/// takes the last value.
pub fn eval_object(
    entries: &[(String, Expr)],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut fields = Vec::with_capacity(entries.len());
    for (key, expr) in entries {
        fields.push((key.clone(), expr.eval(env, ctx)?));
    }
    Ok(Value::record(fields))
}
