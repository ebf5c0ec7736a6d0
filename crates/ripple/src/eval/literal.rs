//! Literal evaluation

use crate::ast::Literal;
use crate::Value;

/// Convert a literal node into its runtime value.
pub fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::string(s),
    }
}
