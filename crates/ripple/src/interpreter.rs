//! Top-level program execution

use crate::ast::Program;
use crate::eval::stmt::exec_stmts;
use crate::module::Exports;
use crate::scheduler;
use crate::{Environment, EvalContext, Result, Value};

/// Runs programs against one global environment.
///
/// Global bindings persist across [`execute`](Interpreter::execute) calls,
/// so a host can feed a script in pieces. Observer callbacks queue on the
/// context's scheduler until [`run_pending`](Interpreter::run_pending).
///
/// # Example
///
/// ```
/// use ripple::ast::build::*;
/// use ripple::{Interpreter, Value};
///
/// let mut interp = Interpreter::new();
/// let program = program(vec![let_("x", num(20.0)), expr_stmt(add(ident("x"), num(1.0)))]);
/// assert_eq!(interp.execute(&program).unwrap(), Value::Number(21.0));
/// ```
#[derive(Debug)]
pub struct Interpreter {
    env: Environment,
    ctx: EvalContext,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with the default context.
    pub fn new() -> Self {
        Self::with_context(EvalContext::new())
    }

    /// Create an interpreter around a configured context.
    pub fn with_context(ctx: EvalContext) -> Self {
        Self {
            env: Environment::with_max_call_depth(ctx.max_call_depth),
            ctx,
        }
    }

    /// Execute a program at the global scope.
    ///
    /// Returns the value of the last top-level expression statement.
    /// Scheduled observers are not run.
    ///
    /// # Errors
    ///
    /// The first uncaught error, or `BreakOutsideLoop` /
    /// `ContinueOutsideLoop` / `ReturnOutsideFunction` for a signal that
    /// reached the top level.
    #[tracing::instrument(skip_all, fields(statements = program.body.len()))]
    pub fn execute(&mut self, program: &Program) -> Result<Value> {
        let flow = exec_stmts(&program.body, &mut self.env, &self.ctx).map_err(|err| {
            tracing::debug!(error = %err, "program failed");
            err
        })?;
        if let Some(err) = flow.escape_error(false, None) {
            return Err(err);
        }
        Ok(flow.into_value())
    }

    /// Execute a program, then drain the scheduler.
    pub fn run(&mut self, program: &Program) -> Result<Value> {
        let value = self.execute(program)?;
        self.run_pending()?;
        Ok(value)
    }

    /// Run scheduled tasks until the queue is empty.
    ///
    /// Returns how many tasks ran.
    pub fn run_pending(&mut self) -> Result<usize> {
        scheduler::run_pending(&mut self.env, &self.ctx)
    }

    /// Values of the names exported so far, in export order.
    pub fn exports(&self) -> Exports {
        self.ctx
            .exports
            .borrow()
            .iter()
            .map(|name| {
                let value = self.env.get(name).cloned().unwrap_or(Value::Null);
                (name.clone(), value)
            })
            .collect()
    }

    /// Look up a global binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    /// The global environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The global environment, mutably.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// Abort evaluation at the next check.
    pub fn interrupt(&self) {
        self.ctx.interrupt();
    }

    /// Drop every global binding.
    pub fn reset(&mut self) {
        self.env.clear();
        self.ctx.exports.borrow_mut().clear();
        self.ctx.reset_interrupt();
    }
}
