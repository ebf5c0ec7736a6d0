//! Expression evaluation and statement execution

pub mod array;
pub mod assign;
pub mod binary;
pub mod call;
pub mod control;
pub mod field;
pub mod function;
pub mod if_stmt;
pub mod import;
pub mod literal;
pub mod loops;
pub mod observe;
pub mod path;
pub mod stmt;
pub mod switch;
pub mod try_stmt;
pub mod unary;

use crate::ast::{Expr, ExprKind, Span};
use crate::stack::ensure_sufficient_stack;
use crate::{Environment, EvalContext, EvalError, Value};

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter.
/// Every expression node implements it.
pub trait Evaluate {
    /// Evaluate this AST node in the given environment.
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError>;
}

/// Trait for executing statements.
///
/// `Ok` carries the statement's completion (normal, `break`, `continue`
/// or `return`); a thrown error is `Err`.
pub trait Execute {
    /// Execute this statement in the given environment.
    fn exec(&self, env: &mut Environment, ctx: &EvalContext) -> Result<ControlFlow, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        // Check for interruption before each expression
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        let result = ensure_sufficient_stack(|| match &self.kind {
            ExprKind::Literal(lit) => Ok(literal::eval_literal(lit)),
            ExprKind::Ident(name) => path::eval_ident(name, env, ctx),
            ExprKind::This => Ok(path::eval_this(env)),
            ExprKind::Array(items) => array::eval_array(items, env, ctx),
            ExprKind::Object(entries) => array::eval_object(entries, env, ctx),
            ExprKind::Function(def) => Ok(function::make_function(def, env)),

            ExprKind::Unary { op, operand } => unary::eval_unary(*op, operand, env, ctx),
            ExprKind::Update { op, prefix, target } => {
                unary::eval_update(*op, *prefix, target, env, ctx)
            }
            ExprKind::Binary { op, left, right } => {
                binary::eval_binary_expr(*op, left, right, env, ctx)
            }
            ExprKind::Logical { op, left, right } => {
                binary::eval_logical(*op, left, right, env, ctx)
            }
            ExprKind::Conditional {
                test,
                consequent,
                alternate,
            } => if_stmt::eval_conditional(test, consequent, alternate, env, ctx),

            ExprKind::Assign { op, target, value } => {
                assign::eval_assign(*op, target, value, env, ctx)
            }
            ExprKind::Member { object, property } => {
                field::eval_member(object, property, env, ctx)
            }
            ExprKind::Index { object, index } => field::eval_index(object, index, env, ctx),
            ExprKind::Call { callee, args } => call::eval_call(callee, args, env, ctx),
            ExprKind::Import(path) => import::eval_dynamic_import(path, env, ctx),
        });

        result.map_err(|err| locate(err, self.span))
    }
}

/// Attach `span` to an error that has no location yet.
///
/// The innermost node with a known position wins.
pub(crate) fn locate(err: EvalError, span: Span) -> EvalError {
    if span.is_known() {
        err.with_span(span)
    } else {
        err
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression (convenience wrapper).
pub fn eval_expr(expr: &Expr, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    expr.eval(env, ctx)
}

// Re-export for use by other modules
pub use call::call_value;
pub use control::ControlFlow;
pub use stmt::{exec_block, exec_stmts};
