//! `import`, dynamic `import()`, and `export`

use crate::ast::{Expr, ExprKind, ImportSpecifier, Span, Stmt, StmtKind};
use crate::eval::control::ControlFlow;
use crate::module::Exports;
use crate::{BindingMode, Environment, EvalContext, EvalError, Value};

use super::{Evaluate, Execute};

/// Execute `import { a, b as c } from "source"` / `import * as m from "source"`.
///
/// Imported names become immutable bindings in the current scope.
pub fn exec_import(
    specifiers: &[ImportSpecifier],
    source: &str,
    span: Span,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let exports = load_module(source, ctx)?;

    for specifier in specifiers {
        let (local, value) = match specifier {
            ImportSpecifier::Named { imported, local } => {
                let value = exports
                    .get(imported)
                    .cloned()
                    .ok_or_else(|| EvalError::ModuleLoad {
                        path: source.to_string(),
                        message: format!("module does not export `{}`", imported),
                        span: None,
                    })?;
                (local, value)
            }
            ImportSpecifier::Namespace(local) => (local, namespace(&exports)),
        };
        env.declare_at(BindingMode::Immutable, local.clone(), value, Some(span))?;
    }
    Ok(ControlFlow::normal())
}

/// Evaluate `import(path)` to a record of the module's exports.
pub fn eval_dynamic_import(
    path: &Expr,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let path = path.eval(env, ctx)?.to_display_string();
    let exports = load_module(&path, ctx)?;
    Ok(namespace(&exports))
}

/// Execute `export <declaration>` and record the names it declares.
pub fn exec_export(
    declaration: &Stmt,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<ControlFlow, EvalError> {
    let flow = declaration.exec(env, ctx)?;
    ctx.exports
        .borrow_mut()
        .extend(declared_names(declaration));
    Ok(flow)
}

fn declared_names(stmt: &Stmt) -> Vec<String> {
    match &stmt.kind {
        StmtKind::Declare { declarations, .. } => {
            declarations.iter().map(|d| d.name.clone()).collect()
        }
        StmtKind::Function(def) => def.name.iter().cloned().collect(),
        // export of an existing binding: `export name;`
        StmtKind::Expr(Expr {
            kind: ExprKind::Ident(name),
            ..
        }) => vec![name.clone()],
        _ => Vec::new(),
    }
}

fn load_module(path: &str, ctx: &EvalContext) -> Result<Exports, EvalError> {
    let loader = ctx.loader.as_ref().ok_or_else(|| EvalError::ModuleLoad {
        path: path.to_string(),
        message: "no module loader configured".to_string(),
        span: None,
    })?;
    loader.load(path).map_err(|err| EvalError::ModuleLoad {
        path: path.to_string(),
        message: format!("{:#}", err),
        span: None,
    })
}

fn namespace(exports: &Exports) -> Value {
    Value::record(exports.iter().map(|(k, v)| (k.clone(), v.clone())))
}
