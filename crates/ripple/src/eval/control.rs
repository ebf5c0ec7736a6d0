//! Completion of a statement: normal, or one of the non-local exits

use crate::ast::Span;
use crate::{EvalError, Value};

/// How a statement finished.
///
/// `break`, `continue` and `return` travel up the Rust call stack as
/// values of this type until the loop, switch or call that consumes them.
/// Thrown errors travel as `Err(EvalError)` instead.
#[derive(Debug, Clone)]
pub enum ControlFlow {
    /// Completed normally with a value
    Normal(Value),

    /// `break`
    Break,

    /// `continue`
    Continue,

    /// `return` with a value
    Return(Value),
}

impl ControlFlow {
    /// Normal completion without a value.
    pub fn normal() -> Self {
        ControlFlow::Normal(Value::Null)
    }

    /// Whether this completion leaves the enclosing statement list early.
    pub fn is_abrupt(&self) -> bool {
        !matches!(self, ControlFlow::Normal(_))
    }

    /// The carried value (`null` for `break` and `continue`).
    pub fn into_value(self) -> Value {
        match self {
            ControlFlow::Normal(value) | ControlFlow::Return(value) => value,
            ControlFlow::Break | ControlFlow::Continue => Value::Null,
        }
    }

    /// Convert a signal that escaped its valid context into an error.
    ///
    /// `return` is allowed to escape only when `in_function` is set.
    pub fn escape_error(&self, in_function: bool, span: Option<Span>) -> Option<EvalError> {
        match self {
            ControlFlow::Normal(_) => None,
            ControlFlow::Break => Some(EvalError::BreakOutsideLoop { span }),
            ControlFlow::Continue => Some(EvalError::ContinueOutsideLoop { span }),
            ControlFlow::Return(_) if in_function => None,
            ControlFlow::Return(_) => Some(EvalError::ReturnOutsideFunction { span }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_value() {
        assert_eq!(
            ControlFlow::Return(Value::Number(1.0)).into_value(),
            Value::Number(1.0)
        );
        assert_eq!(ControlFlow::Break.into_value(), Value::Null);
    }

    #[test]
    fn test_is_abrupt() {
        assert!(!ControlFlow::normal().is_abrupt());
        assert!(ControlFlow::Continue.is_abrupt());
        assert!(ControlFlow::Return(Value::Null).is_abrupt());
    }

    #[test]
    fn test_escape_error() {
        assert!(matches!(
            ControlFlow::Break.escape_error(true, None),
            Some(EvalError::BreakOutsideLoop { .. })
        ));
        assert!(ControlFlow::Return(Value::Null)
            .escape_error(true, None)
            .is_none());
        assert!(matches!(
            ControlFlow::Return(Value::Null).escape_error(false, None),
            Some(EvalError::ReturnOutsideFunction { .. })
        ));
    }
}
