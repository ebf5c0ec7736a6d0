//! `try`/`catch`/`finally` and `throw`

use crate::ast::{CatchClause, Expr, Span, Stmt};
use crate::eval::control::ControlFlow;
use crate::{BindingMode, Environment, EvalContext, EvalError, Value};

use super::stmt::{exec_block, exec_stmts};
use super::Evaluate;

/// Execute `try { block } catch (param) { handler } finally { finalizer }`.
///
/// - A catchable error from the block is handed to the handler.
/// - The finalizer runs exactly once whichever way the block and handler
///   finish. If it completes abruptly (`return`, `break`, `continue`) that
///   completion replaces the try/catch outcome.
/// - An error raised by the finalizer propagates, unless the block had
///   already raised; then it is logged and dropped.
pub fn exec_try(
    block: &[Stmt],
    handler: Option<&CatchClause>,
    finalizer: Option<&[Stmt]>,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let result = exec_block(block, env, ctx);
    let block_raised = result.is_err();

    let outcome = match (result, handler) {
        (Err(err), Some(handler)) if err.is_catchable() => {
            tracing::debug!(error = %err, "caught");
            exec_catch(handler, err.thrown_value(), env, ctx)
        }
        (result, _) => result,
    };

    let Some(finalizer) = finalizer else {
        return outcome;
    };

    match exec_block(finalizer, env, ctx) {
        Ok(flow) if flow.is_abrupt() => Ok(flow),
        Ok(_) => outcome,
        Err(err) if block_raised && err.is_catchable() => {
            tracing::warn!(error = %err, "error raised in finally was discarded");
            outcome
        }
        Err(err) => Err(err),
    }
}

/// Run a catch handler with its parameter bound for the handler only.
fn exec_catch(
    handler: &CatchClause,
    thrown: Value,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let mut scope = env.scope_guard();
    if let Some(param) = &handler.param {
        scope.define(param.clone(), thrown, BindingMode::BlockMutable);
    }
    exec_stmts(&handler.body, &mut scope, ctx)
}

/// Execute `throw value`.
pub fn exec_throw(
    value: &Expr,
    span: Span,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let value = value.eval(env, ctx)?;
    Err(EvalError::UserThrown {
        message: value.to_display_string(),
        value,
        span: span.is_known().then_some(span),
    })
}
