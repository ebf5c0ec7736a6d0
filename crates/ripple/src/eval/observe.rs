//! Reactive variable observation
//!
//! Observers never run inline with the assignment that triggers them. Each
//! one becomes a scheduler task that calls the handler on a later turn; a
//! failing handler is logged and does not affect the assignment.

use std::rc::Rc;

use crate::ast::Expr;
use crate::environment::{MultiObserver, Mutation};
use crate::eval::control::ControlFlow;
use crate::{Environment, EvalContext, EvalError, Value};

use super::call::call_value;
use super::Evaluate;

/// Execute `observe name handler` or `observe (a, b, ...) handler`.
///
/// One target registers a single-variable observer called with
/// `(old, new, name)`. Several targets register one multi-variable
/// observer called with a change-info record.
///
/// # Errors
///
/// `UndeclaredObserveTarget` if a target is not bound, `NotCallable` if the
/// handler is not a function.
pub fn exec_observe(
    targets: &[String],
    handler: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let handler = handler.eval(env, ctx)?;
    if !handler.is_callable() {
        return Err(EvalError::NotCallable {
            callee: format!("observer of {}", targets.join(", ")),
            span: None,
        });
    }

    match targets {
        [name] => env.observe(name, handler)?,
        names => env.observe_many(names, handler)?,
    }
    tracing::debug!(targets = ?targets, "observer registered");
    Ok(ControlFlow::normal())
}

/// Schedule every observer of a changed binding.
///
/// Single-variable observers are queued first, in registration order, then
/// multi-variable ones. Change-info records are built now, so they carry
/// the values as of this assignment.
pub fn notify(mutation: Mutation, env: &Environment, ctx: &EvalContext) {
    let Mutation {
        name,
        old,
        new,
        observers,
        multi_observers,
    } = mutation;

    for handler in observers {
        let args = vec![old.clone(), new.clone(), Value::string(&name)];
        schedule(ctx, name.clone(), handler, args);
    }

    for registration in multi_observers {
        let info = change_info(&registration, &name, &old, &new, env);
        schedule(ctx, name.clone(), registration.handler.clone(), vec![info]);
    }
}

/// `{ name, values: { watched: current, ... }, old, new }`
fn change_info(
    registration: &Rc<MultiObserver>,
    name: &str,
    old: &Value,
    new: &Value,
    env: &Environment,
) -> Value {
    let values = Value::record(registration.names.iter().map(|watched| {
        let current = env.get(watched).cloned().unwrap_or(Value::Null);
        (watched.clone(), current)
    }));
    Value::record(vec![
        ("name".to_string(), Value::string(name)),
        ("values".to_string(), values),
        ("old".to_string(), old.clone()),
        ("new".to_string(), new.clone()),
    ])
}

fn schedule(ctx: &EvalContext, name: String, handler: Value, args: Vec<Value>) {
    ctx.run_later(Box::new(move |env: &mut Environment, ctx: &EvalContext| {
        if let Err(err) = call_value(&handler, args, None, env, ctx) {
            let err = EvalError::ObserverError {
                name,
                message: err.to_string(),
                span: err.span(),
            };
            tracing::warn!(error = %err, "observer failed");
        }
    }));
}
