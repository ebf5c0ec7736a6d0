//! Function call evaluation

use std::rc::Rc;

use crate::ast::{Expr, ExprKind};
use crate::error::type_name;
use crate::stack::ensure_sufficient_stack;
use crate::eval::control::ControlFlow;
use crate::value::BoundMethod;
use crate::{BindingMode, BuiltinFn, Environment, EvalContext, EvalError, FunctionValue, Value};

use super::field::{get_index, get_member};
use super::path::THIS;
use super::stmt::exec_stmts;
use super::Evaluate;

/// Evaluate `callee(args)`.
///
/// A member or index callee is a method call: the object it was read from
/// becomes `this`.
pub fn eval_call(
    callee: &Expr,
    args: &[Expr],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let (func, this) = match &callee.kind {
        ExprKind::Member { object, property } => {
            let receiver = object.eval(env, ctx)?;
            (get_member(&receiver, property)?, Some(receiver))
        }
        ExprKind::Index { object, index } => {
            let receiver = object.eval(env, ctx)?;
            let key = index.eval(env, ctx)?;
            (get_index(&receiver, &key)?, Some(receiver))
        }
        _ => (callee.eval(env, ctx)?, None),
    };

    // Evaluate arguments
    let args: Vec<Value> = args
        .iter()
        .map(|arg| arg.eval(env, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    if !func.is_callable() {
        return Err(EvalError::NotCallable {
            callee: callee_name(callee),
            span: None,
        });
    }

    call_value(&func, args, this, env, ctx)
}

/// Call a Value as a function.
///
/// # Errors
///
/// Returns `NotCallable` if the value is not callable, and whatever the
/// callee raises.
pub fn call_value(
    func: &Value,
    args: Vec<Value>,
    this: Option<Value>,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    match func {
        Value::Function(f) => call_function(f, args, this, env, ctx),
        Value::Builtin(f) => call_builtin(f, &args),
        Value::BoundMethod(m) => call_bound_method(m, &args),
        other => Err(EvalError::NotCallable {
            callee: type_name(other).to_string(),
            span: None,
        }),
    }
}

/// Call a user-defined function.
///
/// Binds `this` and the parameters (missing arguments are `null`, extra
/// ones are dropped) over the re-installed closure, then runs the body.
fn call_function(
    func: &Rc<FunctionValue>,
    args: Vec<Value>,
    this: Option<Value>,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    ensure_sufficient_stack(|| run_function(func, args, this, env, ctx))
}

fn run_function(
    func: &Rc<FunctionValue>,
    args: Vec<Value>,
    this: Option<Value>,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    // Scopes and call depth are released when the guard drops
    let mut frame = env.call_guard(func)?;

    if ctx.trace {
        tracing::trace!(
            function = func.display_name(),
            depth = frame.call_depth(),
            "call"
        );
    }

    frame.define(THIS, this.unwrap_or(Value::Null), BindingMode::Immutable);
    let mut args = args.into_iter();
    for param in func.params.iter() {
        let arg = args.next().unwrap_or(Value::Null);
        frame.define(param.clone(), arg, BindingMode::Mutable);
    }

    let flow = exec_stmts(&func.body, &mut frame, ctx)?;
    if let Some(err) = flow.escape_error(true, None) {
        return Err(err);
    }

    // Handle return control flow
    match flow {
        ControlFlow::Return(value) => Ok(value),
        _ => Ok(Value::Null),
    }
}

/// Call a built-in function.
fn call_builtin(func: &BuiltinFn, args: &[Value]) -> Result<Value, EvalError> {
    // Check arity (if not variadic)
    if func.arity >= 0 && args.len() != func.arity as usize {
        return Err(EvalError::ArityMismatch {
            name: func.name.clone(),
            expected: func.arity as usize,
            got: args.len(),
            span: None,
        });
    }

    (func.func)(args).map_err(|message| EvalError::HostError {
        name: func.name.clone(),
        message,
        span: None,
    })
}

fn call_bound_method(method: &BoundMethod, args: &[Value]) -> Result<Value, EvalError> {
    method.invoke(args).map_err(|message| EvalError::HostError {
        name: format!("{}.{}", method.receiver.type_name(), method.method),
        message,
        span: None,
    })
}

/// Source-ish rendering of a callee for `NotCallable` messages.
fn callee_name(callee: &Expr) -> String {
    match &callee.kind {
        ExprKind::Ident(name) => name.clone(),
        ExprKind::This => THIS.to_string(),
        ExprKind::Member { object, property } => format!("{}.{}", callee_name(object), property),
        ExprKind::Index { object, .. } => format!("{}[...]", callee_name(object)),
        _ => "expression".to_string(),
    }
}
