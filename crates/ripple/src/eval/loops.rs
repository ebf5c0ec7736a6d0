//! Loop statements

use crate::ast::{Expr, LoopBinding, Stmt};
use crate::error::type_name;
use crate::eval::control::ControlFlow;
use crate::{BindingMode, Environment, EvalContext, EvalError, Value};

use super::assign::assign_variable;
use super::{Evaluate, Execute};

/// What a loop does after one run of its body.
enum Iteration {
    /// Keep looping (`continue` or normal completion)
    Next,
    /// `break`
    Stop,
    /// Leave the loop with this completion (`return`)
    Exit(ControlFlow),
}

fn iteration(flow: ControlFlow) -> Iteration {
    match flow {
        ControlFlow::Normal(_) | ControlFlow::Continue => Iteration::Next,
        ControlFlow::Break => Iteration::Stop,
        flow @ ControlFlow::Return(_) => Iteration::Exit(flow),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// while / do-while
// ═══════════════════════════════════════════════════════════════════════

/// Execute `while (test) body`.
pub fn exec_while(
    test: &Expr,
    body: &Stmt,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    loop {
        // Check for interruption
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        if !test.eval(env, ctx)?.is_truthy() {
            break;
        }

        match iteration(body.exec(env, ctx)?) {
            Iteration::Next => {}
            Iteration::Stop => break,
            Iteration::Exit(flow) => return Ok(flow),
        }
    }
    Ok(ControlFlow::normal())
}

/// Execute `do body while (test)`; the body runs at least once.
pub fn exec_do_while(
    body: &Stmt,
    test: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    loop {
        // Check for interruption
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        match iteration(body.exec(env, ctx)?) {
            Iteration::Next => {}
            Iteration::Stop => break,
            Iteration::Exit(flow) => return Ok(flow),
        }

        if !test.eval(env, ctx)?.is_truthy() {
            break;
        }
    }
    Ok(ControlFlow::normal())
}

// ═══════════════════════════════════════════════════════════════════════
// for
// ═══════════════════════════════════════════════════════════════════════

/// Execute `for (init; test; update) body`.
///
/// One scope holds the whole loop, so `let` in the initializer is visible
/// to the test, update and body but not after the loop. `continue` still
/// runs the update.
pub fn exec_for(
    init: Option<&Stmt>,
    test: Option<&Expr>,
    update: Option<&Expr>,
    body: &Stmt,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let mut scope = env.scope_guard();

    if let Some(init) = init {
        init.exec(&mut scope, ctx)?;
    }

    loop {
        // Check for interruption
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        if let Some(test) = test {
            if !test.eval(&mut scope, ctx)?.is_truthy() {
                break;
            }
        }

        match iteration(body.exec(&mut scope, ctx)?) {
            Iteration::Next => {}
            Iteration::Stop => break,
            Iteration::Exit(flow) => return Ok(flow),
        }

        if let Some(update) = update {
            update.eval(&mut scope, ctx)?;
        }
    }
    Ok(ControlFlow::normal())
}

// ═══════════════════════════════════════════════════════════════════════
// for-in / for-of
// ═══════════════════════════════════════════════════════════════════════

/// Execute `for (binding in object) body` over string keys.
///
/// Records yield their keys in insertion order; lists, strings and
/// enumerable host objects yield their indices as strings. Anything else
/// has no keys.
pub fn exec_for_in(
    binding: &LoopBinding,
    object: &Expr,
    body: &Stmt,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let object = object.eval(env, ctx)?;
    let count = match &object {
        Value::Record(fields) => {
            let keys = fields.borrow().keys().map(Value::string).collect();
            return iterate(binding, keys, body, env, ctx);
        }
        Value::List(items) => items.borrow().len(),
        Value::String(s) => s.chars().count(),
        Value::Host(host) => host.enumerate().map(|values| values.len()).unwrap_or(0),
        _ => 0,
    };
    let keys = (0..count).map(|i| Value::string(i.to_string())).collect();
    iterate(binding, keys, body, env, ctx)
}

/// Execute `for (binding of iterable) body` over element values.
///
/// # Errors
///
/// `NotIterable` unless the operand is a list, a string, or a host object
/// that enumerates.
pub fn exec_for_of(
    binding: &LoopBinding,
    iterable: &Expr,
    body: &Stmt,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let iterable = iterable.eval(env, ctx)?;
    let values = match &iterable {
        // Snapshot: the body may mutate the list
        Value::List(items) => items.borrow().clone(),
        Value::String(s) => s.chars().map(|c| Value::string(c.to_string())).collect(),
        Value::Host(host) => host.enumerate().ok_or_else(|| not_iterable(&iterable))?,
        other => return Err(not_iterable(other)),
    };
    iterate(binding, values, body, env, ctx)
}

fn not_iterable(value: &Value) -> EvalError {
    let type_name = match value {
        Value::Host(host) => host.type_name().to_string(),
        other => type_name(other).to_string(),
    };
    EvalError::NotIterable {
        type_name,
        span: None,
    }
}

/// Run `body` once per item with the loop variable set to it.
///
/// A declared loop variable lives in a loop scope and is bound once, then
/// overwritten each iteration. Without a declaration the existing variable
/// is assigned normally, observers included.
fn iterate(
    binding: &LoopBinding,
    items: Vec<Value>,
    body: &Stmt,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let mut scope = env.scope_guard();
    if let Some(kind) = binding.kind {
        scope.define(binding.name.clone(), Value::Null, BindingMode::from(kind));
    }

    for item in items {
        // Check for interruption
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        if binding.kind.is_some() {
            scope.set_local(&binding.name, item);
        } else {
            assign_variable(&binding.name, item, &mut scope, ctx)?;
        }

        match iteration(body.exec(&mut scope, ctx)?) {
            Iteration::Next => {}
            Iteration::Stop => break,
            Iteration::Exit(flow) => return Ok(flow),
        }
    }
    Ok(ControlFlow::normal())
}
