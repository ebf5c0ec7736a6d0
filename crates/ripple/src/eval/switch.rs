//! `switch` statements

use crate::ast::{Expr, SwitchCase};
use crate::eval::control::ControlFlow;
use crate::{Environment, EvalContext, EvalError};

use super::stmt::exec_stmts;
use super::Evaluate;

/// Execute `switch (discriminant) { cases }`.
///
/// The discriminant is evaluated once and compared to case tests in
/// source order with strict equality. From the first match on, every case
/// body runs until a `break`. `default` is entered when it is reached with
/// no earlier match. All case bodies share one scope.
pub fn exec_switch(
    discriminant: &Expr,
    cases: &[SwitchCase],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let value = discriminant.eval(env, ctx)?;
    let mut scope = env.scope_guard();
    let mut matched = false;

    for case in cases {
        if !matched {
            matched = match &case.test {
                Some(test) => value.strict_equals(&test.eval(&mut scope, ctx)?),
                None => true,
            };
        }
        if !matched {
            continue;
        }

        match exec_stmts(&case.body, &mut scope, ctx)? {
            ControlFlow::Break => return Ok(ControlFlow::normal()),
            ControlFlow::Normal(_) => {}
            // continue belongs to an enclosing loop
            flow => return Ok(flow),
        }
    }

    Ok(ControlFlow::normal())
}
