//! Statement execution

use crate::ast::{DeclKind, Declarator, Span, Stmt, StmtKind};
use crate::eval::control::ControlFlow;
use crate::{BindingMode, Environment, EvalContext, EvalError, Value};

use super::function::declare_function;
use super::{if_stmt, import, locate, loops, observe, switch, try_stmt};
use super::{Evaluate, Execute};

impl Execute for Stmt {
    fn exec(&self, env: &mut Environment, ctx: &EvalContext) -> Result<ControlFlow, EvalError> {
        // Check for interruption
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        if ctx.trace {
            tracing::trace!(
                kind = self.kind.name(),
                line = self.span.line,
                column = self.span.column,
                "exec"
            );
        }

        let result = match &self.kind {
            StmtKind::Expr(expr) => expr.eval(env, ctx).map(ControlFlow::Normal),
            StmtKind::Declare { kind, declarations } => {
                exec_declare(*kind, declarations, self.span, env, ctx)
            }
            StmtKind::Function(def) => declare_function(def, self.span, env, ctx),
            StmtKind::Block(body) | StmtKind::Otherwise(body) => exec_block(body, env, ctx),
            StmtKind::Empty => Ok(ControlFlow::normal()),

            StmtKind::If {
                test,
                consequent,
                alternate,
            } => if_stmt::exec_if(test, consequent, alternate.as_deref(), env, ctx),
            // Outside a statement list a `when` is a plain guard
            StmtKind::When { test, body } => match test.eval(env, ctx) {
                Ok(guard) if guard.is_truthy() => exec_block(body, env, ctx),
                Ok(_) => Ok(ControlFlow::normal()),
                Err(err) => Err(err),
            },

            StmtKind::While { test, body } => loops::exec_while(test, body, env, ctx),
            StmtKind::DoWhile { body, test } => loops::exec_do_while(body, test, env, ctx),
            StmtKind::For {
                init,
                test,
                update,
                body,
            } => loops::exec_for(
                init.as_deref(),
                test.as_ref(),
                update.as_ref(),
                body,
                env,
                ctx,
            ),
            StmtKind::ForIn {
                binding,
                object,
                body,
            } => loops::exec_for_in(binding, object, body, env, ctx),
            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => loops::exec_for_of(binding, iterable, body, env, ctx),
            StmtKind::Switch {
                discriminant,
                cases,
            } => switch::exec_switch(discriminant, cases, env, ctx),

            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => try_stmt::exec_try(
                block,
                handler.as_ref(),
                finalizer.as_deref(),
                env,
                ctx,
            ),
            StmtKind::Throw(value) => try_stmt::exec_throw(value, self.span, env, ctx),
            StmtKind::Return(value) => match value {
                Some(value) => value.eval(env, ctx).map(ControlFlow::Return),
                None => Ok(ControlFlow::Return(Value::Null)),
            },
            StmtKind::Break => Ok(ControlFlow::Break),
            StmtKind::Continue => Ok(ControlFlow::Continue),

            StmtKind::Observe { targets, handler } => {
                observe::exec_observe(targets, handler, env, ctx)
            }
            StmtKind::Import { specifiers, source } => {
                import::exec_import(specifiers, source, self.span, env, ctx)
            }
            StmtKind::Export(declaration) => import::exec_export(declaration, env, ctx),
        };

        result.map_err(|err| locate(err, self.span))
    }
}

/// Execute `let`/`const`/`var` declarations in order.
///
/// Each initializer is evaluated before its name is bound, so
/// `let x = x;` sees any outer `x`.
fn exec_declare(
    kind: DeclKind,
    declarations: &[Declarator],
    span: Span,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let mode = BindingMode::from(kind);
    for declarator in declarations {
        let value = match &declarator.init {
            Some(init) => init.eval(env, ctx)?,
            None => Value::Null,
        };
        env.declare_at(mode, declarator.name.clone(), value, Some(span))
            .map_err(|err| err.at(span))?;
    }
    Ok(ControlFlow::normal())
}

/// Execute a block in a fresh scope.
///
/// The scope is popped on every exit path.
pub fn exec_block(
    stmts: &[Stmt],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let mut scope = env.scope_guard();
    exec_stmts(stmts, &mut scope, ctx)
}

/// Execute a statement list in the current scope.
///
/// `when` statements act as guarded branches: the first one whose
/// condition holds runs its body and ends the list, skipping everything
/// after it (any `otherwise` included). A false `when` is skipped and
/// execution carries on, so an `otherwise` that is reached runs.
///
/// Completes with the value of the last expression statement, or with the
/// first abrupt completion.
pub fn exec_stmts(
    stmts: &[Stmt],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let mut last = Value::Null;

    for stmt in stmts {
        if let StmtKind::When { test, body } = &stmt.kind {
            // Check for interruption
            if ctx.is_interrupted() {
                return Err(EvalError::Interrupted);
            }
            let fired = test
                .eval(env, ctx)
                .map_err(|err| locate(err, stmt.span))?
                .is_truthy();
            if fired {
                return exec_block(body, env, ctx);
            }
            continue;
        }

        match stmt.exec(env, ctx)? {
            ControlFlow::Normal(value) => {
                if matches!(stmt.kind, StmtKind::Expr(_)) {
                    last = value;
                }
            }
            flow => return Ok(flow),
        }
    }

    Ok(ControlFlow::Normal(last))
}
