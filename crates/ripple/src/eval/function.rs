//! Function creation and declaration

use std::rc::Rc;

use crate::ast::{FunctionDef, Span};
use crate::eval::control::ControlFlow;
use crate::{BindingMode, Environment, EvalContext, EvalError, FunctionValue, Value};

/// Create a function value, snapshotting every binding visible here.
pub fn make_function(def: &FunctionDef, env: &Environment) -> Value {
    Value::Function(Rc::new(FunctionValue::new(def, env.capture())))
}

/// Execute `function name(params) { body }`.
///
/// The function is bound in the current scope like any other declaration,
/// so a second declaration of the same name in that scope fails.
pub fn declare_function(
    def: &FunctionDef,
    span: Span,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let Some(name) = &def.name else {
        return Err(EvalError::TypeMismatch {
            message: "function declaration needs a name".to_string(),
            span: Some(span),
        });
    };

    let value = make_function(def, env);
    env.declare_at(BindingMode::Function, name.clone(), value, Some(span))?;

    if ctx.trace {
        tracing::debug!(function = %name, params = def.params.len(), "declared function");
    }
    Ok(ControlFlow::normal())
}
