//! Terse constructors for building syntax trees by hand
//!
//! ```
//! use ripple::ast::build::*;
//!
//! // let total = 0; total = total + 1;
//! let program = program(vec![
//!     let_("total", num(0.0)),
//!     expr_stmt(assign(ident("total"), add(ident("total"), num(1.0)))),
//! ]);
//! assert_eq!(program.body.len(), 2);
//! ```

use std::rc::Rc;

use super::*;

/// Wrap statements into a program.
pub fn program(body: Vec<Stmt>) -> Program {
    Program::new(body)
}

// ═══════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════

/// `null`
pub fn null() -> Expr {
    Expr::new(ExprKind::Literal(Literal::Null))
}

/// `true` / `false`
pub fn boolean(b: bool) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Bool(b)))
}

/// Numeric literal
pub fn num(n: f64) -> Expr {
    Expr::new(ExprKind::Literal(Literal::Number(n)))
}

/// String literal
pub fn string(s: &str) -> Expr {
    Expr::new(ExprKind::Literal(Literal::String(s.to_string())))
}

/// Variable reference
pub fn ident(name: &str) -> Expr {
    Expr::new(ExprKind::Ident(name.to_string()))
}

/// `this`
pub fn this() -> Expr {
    Expr::new(ExprKind::This)
}

/// `[items]`
pub fn array(items: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Array(items))
}

/// `{ key: value, ... }`
pub fn object(entries: Vec<(&str, Expr)>) -> Expr {
    Expr::new(ExprKind::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    ))
}

/// Prefix operator
pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::new(ExprKind::Unary {
        op,
        operand: Box::new(operand),
    })
}

/// Binary operator
pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::new(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// `left + right`
pub fn add(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Add, left, right)
}

/// `left < right`
pub fn lt(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::Lt, left, right)
}

/// `left === right`
pub fn strict_eq(left: Expr, right: Expr) -> Expr {
    binary(BinaryOp::StrictEq, left, right)
}

/// Short-circuiting operator
pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    Expr::new(ExprKind::Logical {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// `test ? consequent : alternate`
pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
    Expr::new(ExprKind::Conditional {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    })
}

/// `target = value`
pub fn assign(target: Expr, value: Expr) -> Expr {
    Expr::new(ExprKind::Assign {
        op: None,
        target: Box::new(target),
        value: Box::new(value),
    })
}

/// `target op= value`
pub fn compound(op: BinaryOp, target: Expr, value: Expr) -> Expr {
    Expr::new(ExprKind::Assign {
        op: Some(op),
        target: Box::new(target),
        value: Box::new(value),
    })
}

fn update(op: UpdateOp, prefix: bool, target: Expr) -> Expr {
    Expr::new(ExprKind::Update {
        op,
        prefix,
        target: Box::new(target),
    })
}

/// `++target`
pub fn pre_inc(target: Expr) -> Expr {
    update(UpdateOp::Increment, true, target)
}

/// `target++`
pub fn post_inc(target: Expr) -> Expr {
    update(UpdateOp::Increment, false, target)
}

/// `--target`
pub fn pre_dec(target: Expr) -> Expr {
    update(UpdateOp::Decrement, true, target)
}

/// `target--`
pub fn post_dec(target: Expr) -> Expr {
    update(UpdateOp::Decrement, false, target)
}

/// `object.property`
pub fn member(object: Expr, property: &str) -> Expr {
    Expr::new(ExprKind::Member {
        object: Box::new(object),
        property: property.to_string(),
    })
}

/// `object[index]`
pub fn index(object: Expr, index: Expr) -> Expr {
    Expr::new(ExprKind::Index {
        object: Box::new(object),
        index: Box::new(index),
    })
}

/// `callee(args)`
pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::new(ExprKind::Call {
        callee: Box::new(callee),
        args,
    })
}

/// `object.method(args)`
pub fn method_call(object: Expr, method: &str, args: Vec<Expr>) -> Expr {
    call(member(object, method), args)
}

/// `console.log(args)`
pub fn log(args: Vec<Expr>) -> Stmt {
    expr_stmt(method_call(ident("console"), "log", args))
}

fn function_def(name: Option<&str>, params: &[&str], body: Vec<Stmt>) -> Rc<FunctionDef> {
    Rc::new(FunctionDef {
        name: name.map(str::to_string),
        params: params.iter().map(|p| p.to_string()).collect(),
        body: body.into(),
    })
}

/// Anonymous `function (params) { body }`
pub fn func(params: &[&str], body: Vec<Stmt>) -> Expr {
    Expr::new(ExprKind::Function(function_def(None, params, body)))
}

/// `(params) => expr`
pub fn arrow(params: &[&str], expr: Expr) -> Expr {
    func(params, vec![return_(expr)])
}

/// `import(path)`
pub fn dynamic_import(path: Expr) -> Expr {
    Expr::new(ExprKind::Import(Box::new(path)))
}

// ═══════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════

/// Expression statement
pub fn expr_stmt(expr: Expr) -> Stmt {
    Stmt::new(StmtKind::Expr(expr))
}

/// Single-name declaration
pub fn declare(kind: DeclKind, name: &str, init: Option<Expr>) -> Stmt {
    Stmt::new(StmtKind::Declare {
        kind,
        declarations: vec![Declarator {
            name: name.to_string(),
            init,
        }],
    })
}

/// `let name = init;`
pub fn let_(name: &str, init: Expr) -> Stmt {
    declare(DeclKind::Let, name, Some(init))
}

/// `const name = init;`
pub fn const_(name: &str, init: Expr) -> Stmt {
    declare(DeclKind::Const, name, Some(init))
}

/// `var name = init;`
pub fn var_(name: &str, init: Expr) -> Stmt {
    declare(DeclKind::Var, name, Some(init))
}

/// `function name(params) { body }`
pub fn function(name: &str, params: &[&str], body: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Function(function_def(Some(name), params, body)))
}

/// `{ stmts }`
pub fn block(stmts: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Block(stmts))
}

/// `if (test) consequent else alternate`
pub fn if_(test: Expr, consequent: Stmt, alternate: Option<Stmt>) -> Stmt {
    Stmt::new(StmtKind::If {
        test,
        consequent: Box::new(consequent),
        alternate: alternate.map(Box::new),
    })
}

/// `while (test) body`
pub fn while_(test: Expr, body: Stmt) -> Stmt {
    Stmt::new(StmtKind::While {
        test,
        body: Box::new(body),
    })
}

/// `do body while (test)`
pub fn do_while(body: Stmt, test: Expr) -> Stmt {
    Stmt::new(StmtKind::DoWhile {
        body: Box::new(body),
        test,
    })
}

/// `for (init; test; update) body`
pub fn for_(init: Option<Stmt>, test: Option<Expr>, update: Option<Expr>, body: Stmt) -> Stmt {
    Stmt::new(StmtKind::For {
        init: init.map(Box::new),
        test,
        update,
        body: Box::new(body),
    })
}

/// `for (kind name in object) body`
pub fn for_in(kind: Option<DeclKind>, name: &str, object: Expr, body: Stmt) -> Stmt {
    Stmt::new(StmtKind::ForIn {
        binding: LoopBinding {
            kind,
            name: name.to_string(),
        },
        object,
        body: Box::new(body),
    })
}

/// `for (kind name of iterable) body`
pub fn for_of(kind: Option<DeclKind>, name: &str, iterable: Expr, body: Stmt) -> Stmt {
    Stmt::new(StmtKind::ForOf {
        binding: LoopBinding {
            kind,
            name: name.to_string(),
        },
        iterable,
        body: Box::new(body),
    })
}

/// `switch (discriminant) { cases }`
pub fn switch(discriminant: Expr, cases: Vec<SwitchCase>) -> Stmt {
    Stmt::new(StmtKind::Switch {
        discriminant,
        cases,
    })
}

/// `case test: body`
pub fn case(test: Expr, body: Vec<Stmt>) -> SwitchCase {
    SwitchCase {
        test: Some(test),
        body,
    }
}

/// `default: body`
pub fn default_case(body: Vec<Stmt>) -> SwitchCase {
    SwitchCase { test: None, body }
}

/// `try { block } catch (param) { handler } finally { finalizer }`
pub fn try_(
    block: Vec<Stmt>,
    handler: Option<(Option<&str>, Vec<Stmt>)>,
    finalizer: Option<Vec<Stmt>>,
) -> Stmt {
    Stmt::new(StmtKind::Try {
        block,
        handler: handler.map(|(param, body)| CatchClause {
            param: param.map(str::to_string),
            body,
        }),
        finalizer,
    })
}

/// `try { block } catch (param) { handler }`
pub fn try_catch(block: Vec<Stmt>, param: &str, handler: Vec<Stmt>) -> Stmt {
    try_(block, Some((Some(param), handler)), None)
}

/// `throw value`
pub fn throw_(value: Expr) -> Stmt {
    Stmt::new(StmtKind::Throw(value))
}

/// `return value`
pub fn return_(value: Expr) -> Stmt {
    Stmt::new(StmtKind::Return(Some(value)))
}

/// `return`
pub fn return_void() -> Stmt {
    Stmt::new(StmtKind::Return(None))
}

/// `break`
pub fn break_() -> Stmt {
    Stmt::new(StmtKind::Break)
}

/// `continue`
pub fn continue_() -> Stmt {
    Stmt::new(StmtKind::Continue)
}

/// `when (test) { body }`
pub fn when(test: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::When { test, body })
}

/// `otherwise { body }`
pub fn otherwise(body: Vec<Stmt>) -> Stmt {
    Stmt::new(StmtKind::Otherwise(body))
}

/// `observe targets handler`
pub fn observe(targets: &[&str], handler: Expr) -> Stmt {
    Stmt::new(StmtKind::Observe {
        targets: targets.iter().map(|t| t.to_string()).collect(),
        handler,
    })
}

/// `import { imported as local, ... } from "source"`
pub fn import_named(names: &[(&str, &str)], source: &str) -> Stmt {
    Stmt::new(StmtKind::Import {
        specifiers: names
            .iter()
            .map(|(imported, local)| ImportSpecifier::Named {
                imported: imported.to_string(),
                local: local.to_string(),
            })
            .collect(),
        source: source.to_string(),
    })
}

/// `import * as local from "source"`
pub fn import_all(local: &str, source: &str) -> Stmt {
    Stmt::new(StmtKind::Import {
        specifiers: vec![ImportSpecifier::Namespace(local.to_string())],
        source: source.to_string(),
    })
}

/// `export <declaration>`
pub fn export(declaration: Stmt) -> Stmt {
    Stmt::new(StmtKind::Export(Box::new(declaration)))
}
