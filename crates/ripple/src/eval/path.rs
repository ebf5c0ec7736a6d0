//! Identifier and `this` evaluation

use crate::{Environment, EvalContext, EvalError, Value};

/// Name under which a call's receiver is bound.
pub const THIS: &str = "this";

/// Resolve an identifier.
///
/// Environment bindings come first; host globals are consulted only when
/// no binding is visible, so user code can shadow them.
pub fn eval_ident(name: &str, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    if let Some(value) = env.get(name) {
        return Ok(value.clone());
    }
    ctx.globals
        .get(name)
        .ok_or_else(|| EvalError::UnknownIdentifier {
            name: name.to_string(),
            span: None,
        })
}

/// Value of `this` (`null` outside method calls).
pub fn eval_this(env: &Environment) -> Value {
    env.get(THIS).cloned().unwrap_or(Value::Null)
}
