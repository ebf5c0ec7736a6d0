//! `if` statements and conditional expressions

use crate::ast::{Expr, Stmt};
use crate::eval::control::ControlFlow;
use crate::{Environment, EvalContext, EvalError, Value};

use super::{Evaluate, Execute};

/// Execute `if (test) consequent else alternate`.
///
/// A false condition without an `else` completes normally with `null`.
pub fn exec_if(
    test: &Expr,
    consequent: &Stmt,
    alternate: Option<&Stmt>,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    if test.eval(env, ctx)?.is_truthy() {
        consequent.exec(env, ctx)
    } else if let Some(alternate) = alternate {
        alternate.exec(env, ctx)
    } else {
        Ok(ControlFlow::normal())
    }
}

/// Evaluate `test ? consequent : alternate`; only the taken branch runs.
pub fn eval_conditional(
    test: &Expr,
    consequent: &Expr,
    alternate: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    if test.eval(env, ctx)?.is_truthy() {
        consequent.eval(env, ctx)
    } else {
        alternate.eval(env, ctx)
    }
}
