//! Import and export tests

use std::rc::Rc;

use pretty_assertions::assert_eq;
use ripple::ast::build::*;
use ripple::ast::Stmt;
use ripple::{EvalContext, EvalError, Exports, Interpreter, ModuleLoader, StaticModuleLoader, Value};

fn loader() -> StaticModuleLoader {
    StaticModuleLoader::new()
        .with_module(
            "geometry",
            vec![
                ("ratio".to_string(), Value::Number(2.5)),
                (
                    "double".to_string(),
                    Value::builtin("double", 1, |args| {
                        Ok(Value::Number(args[0].to_number().unwrap_or(f64::NAN) * 2.0))
                    }),
                ),
            ],
        )
        .with_module("empty", Vec::new())
}

fn run(stmts: Vec<Stmt>) -> Result<Value, EvalError> {
    let ctx = EvalContext::new().with_loader(Rc::new(loader()));
    Interpreter::with_context(ctx).execute(&program(stmts))
}

#[test]
fn test_named_import_with_alias() {
    let value = run(vec![
        import_named(&[("ratio", "ratio"), ("double", "twice")], "geometry"),
        expr_stmt(call(ident("twice"), vec![ident("ratio")])),
    ]);
    assert_eq!(value.unwrap(), Value::Number(5.0));
}

#[test]
fn test_imported_bindings_are_immutable() {
    let result = run(vec![
        import_named(&[("ratio", "ratio")], "geometry"),
        expr_stmt(assign(ident("ratio"), num(1.0))),
    ]);
    assert!(matches!(result, Err(EvalError::ConstAssignment { .. })));
}

#[test]
fn test_namespace_import() {
    let value = run(vec![
        import_all("geo", "geometry"),
        expr_stmt(method_call(ident("geo"), "double", vec![member(ident("geo"), "ratio")])),
    ]);
    assert_eq!(value.unwrap(), Value::Number(5.0));
}

#[test]
fn test_dynamic_import_yields_record() {
    let value = run(vec![
        const_("mod", dynamic_import(string("geometry"))),
        expr_stmt(member(ident("mod"), "ratio")),
    ]);
    assert_eq!(value.unwrap(), Value::Number(2.5));
}

#[test]
fn test_missing_export_is_module_error() {
    let result = run(vec![import_named(&[("nope", "nope")], "geometry")]);
    match result {
        Err(EvalError::ModuleLoad { path, message, .. }) => {
            assert_eq!(path, "geometry");
            assert!(message.contains("nope"), "{}", message);
        }
        other => panic!("expected module error, got {:?}", other),
    }
}

#[test]
fn test_unknown_module_is_module_error() {
    let result = run(vec![import_all("m", "nowhere")]);
    match result {
        Err(EvalError::ModuleLoad { path, message, .. }) => {
            assert_eq!(path, "nowhere");
            assert!(message.contains("no module registered"), "{}", message);
        }
        other => panic!("expected module error, got {:?}", other),
    }
}

#[test]
fn test_import_without_loader_fails() {
    let result = Interpreter::new().execute(&program(vec![import_all("m", "geometry")]));
    assert!(matches!(result, Err(EvalError::ModuleLoad { .. })));
}

#[test]
fn test_module_errors_are_catchable() {
    let ctx = EvalContext::new().with_loader(Rc::new(loader()));
    let mut interp = Interpreter::with_context(ctx);
    let value = interp.execute(&program(vec![
        let_("status", string("loaded")),
        try_catch(
            vec![expr_stmt(dynamic_import(string("nowhere")))],
            "e",
            vec![expr_stmt(assign(ident("status"), string("failed")))],
        ),
        expr_stmt(ident("status")),
    ]));
    assert_eq!(value.unwrap(), Value::string("failed"));
}

#[test]
fn test_exports_collect_declared_names() {
    let mut interp = Interpreter::new();
    interp
        .execute(&program(vec![
            export(const_("answer", num(42.0))),
            export(function("greet", &[], vec![return_(string("hi"))])),
            let_("private", num(0.0)),
        ]))
        .unwrap();

    let exports = interp.exports();
    assert_eq!(
        exports.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["answer", "greet"]
    );
    assert_eq!(exports.get("answer"), Some(&Value::Number(42.0)));
    assert!(exports.get("greet").is_some_and(Value::is_callable));
}

#[test]
fn test_exports_feed_another_program_through_a_loader() {
    let mut producer = Interpreter::new();
    producer
        .execute(&program(vec![export(const_("base", num(10.0)))]))
        .unwrap();

    let mut registry = StaticModuleLoader::new();
    registry.register("producer", producer.exports());
    let exports: Exports = registry.load("producer").unwrap();
    assert_eq!(exports.len(), 1);

    let ctx = EvalContext::new().with_loader(Rc::new(registry));
    let value = Interpreter::with_context(ctx).execute(&program(vec![
        import_named(&[("base", "base")], "producer"),
        expr_stmt(add(ident("base"), num(1.0))),
    ]));
    assert_eq!(value.unwrap(), Value::Number(11.0));
}
