//! Reactive observation tests

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use ripple::ast::build::*;
use ripple::ast::{Expr, Stmt};
use ripple::{Console, EvalContext, EvalError, Interpreter, Scheduler, TaskQueue, Value};

fn interpreter() -> (Interpreter, Rc<RefCell<Vec<String>>>) {
    let console = Console::buffered();
    let lines = console.lines();
    (
        Interpreter::with_context(EvalContext::new().with_console(console)),
        lines,
    )
}

fn logged(stmts: Vec<Stmt>) -> Vec<String> {
    let (mut interp, lines) = interpreter();
    interp.run(&program(stmts)).unwrap();
    let lines = lines.borrow().clone();
    lines
}

// (old, new, name) => console.log(name, old, new)
fn change_logger() -> Expr {
    func(
        &["old", "new", "name"],
        vec![log(vec![ident("name"), ident("old"), ident("new")])],
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Single-variable Observers
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_observer_receives_old_new_and_name() {
    let lines = logged(vec![
        let_("x", num(1.0)),
        observe(&["x"], change_logger()),
        expr_stmt(assign(ident("x"), num(2.0))),
    ]);
    assert_eq!(lines, vec!["x 1 2"]);
}

#[test]
fn test_observer_runs_after_the_current_turn() {
    let (mut interp, lines) = interpreter();
    interp
        .execute(&program(vec![
            let_("x", num(1.0)),
            observe(&["x"], change_logger()),
            expr_stmt(assign(ident("x"), num(2.0))),
            log(vec![string("sync")]),
        ]))
        .unwrap();
    assert_eq!(*lines.borrow(), vec!["sync".to_string()]);

    assert_eq!(interp.run_pending().unwrap(), 1);
    assert_eq!(
        *lines.borrow(),
        vec!["sync".to_string(), "x 1 2".to_string()]
    );
}

#[test]
fn test_same_value_assignment_does_not_notify() {
    let lines = logged(vec![
        let_("x", num(1.0)),
        observe(&["x"], change_logger()),
        expr_stmt(assign(ident("x"), num(1.0))),
    ]);
    assert!(lines.is_empty());
}

#[test]
fn test_nan_to_nan_is_not_a_change() {
    let lines = logged(vec![
        let_("x", ident("NaN")),
        observe(&["x"], change_logger()),
        expr_stmt(assign(ident("x"), ident("NaN"))),
    ]);
    assert!(lines.is_empty());
}

#[test]
fn test_every_change_is_delivered_in_order() {
    let lines = logged(vec![
        let_("x", num(0.0)),
        observe(&["x"], change_logger()),
        expr_stmt(assign(ident("x"), num(1.0))),
        expr_stmt(pre_inc(ident("x"))),
        expr_stmt(assign(ident("x"), string("three"))),
    ]);
    assert_eq!(lines, vec!["x 0 1", "x 1 2", "x 2 three"]);
}

#[test]
fn test_multiple_observers_fire_in_registration_order() {
    let lines = logged(vec![
        let_("x", num(0.0)),
        observe(
            &["x"],
            arrow(&[], method_call(ident("console"), "log", vec![string("first")])),
        ),
        observe(
            &["x"],
            arrow(&[], method_call(ident("console"), "log", vec![string("second")])),
        ),
        expr_stmt(assign(ident("x"), num(1.0))),
    ]);
    assert_eq!(lines, vec!["first", "second"]);
}

#[test]
fn test_observer_error_does_not_abort_assignment() {
    let (mut interp, lines) = interpreter();
    let value = interp.run(&program(vec![
        let_("x", num(1.0)),
        observe(&["x"], func(&[], vec![throw_(string("observer broke"))])),
        observe(&["x"], change_logger()),
        expr_stmt(assign(ident("x"), num(2.0))),
        expr_stmt(ident("x")),
    ]));
    assert_eq!(value.unwrap(), Value::Number(2.0));
    // The second observer still ran
    assert_eq!(*lines.borrow(), vec!["x 1 2".to_string()]);
}

#[test]
fn test_loop_variable_assignment_notifies() {
    let lines = logged(vec![
        let_("item", null()),
        observe(&["item"], change_logger()),
        for_of(None, "item", array(vec![num(1.0), num(2.0)]), block(vec![])),
    ]);
    assert_eq!(lines, vec!["item null 1", "item 1 2"]);
}

#[test]
fn test_observe_undeclared_variable_fails() {
    let (mut interp, _) = interpreter();
    let result = interp.execute(&program(vec![observe(&["ghost"], change_logger())]));
    assert!(matches!(
        result,
        Err(EvalError::UndeclaredObserveTarget { ref name, .. }) if name == "ghost"
    ));
}

#[test]
fn test_observe_with_non_callable_handler_fails() {
    let (mut interp, _) = interpreter();
    let result = interp.execute(&program(vec![
        let_("x", num(1.0)),
        observe(&["x"], num(5.0)),
    ]));
    assert!(matches!(result, Err(EvalError::NotCallable { .. })));
}

#[test]
fn test_observer_of_shadowed_name_watches_inner_binding() {
    let lines = logged(vec![
        let_("x", num(0.0)),
        block(vec![
            let_("x", num(10.0)),
            observe(&["x"], change_logger()),
            expr_stmt(assign(ident("x"), num(11.0))),
        ]),
        expr_stmt(assign(ident("x"), num(1.0))),
    ]);
    assert_eq!(lines, vec!["x 10 11"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Multi-variable Observers
// ═══════════════════════════════════════════════════════════════════════

// info => console.log(info.name, info.old, info.new, info.values.a, info.values.b)
fn info_logger() -> Expr {
    func(
        &["info"],
        vec![log(vec![
            member(ident("info"), "name"),
            member(ident("info"), "old"),
            member(ident("info"), "new"),
            member(member(ident("info"), "values"), "a"),
            member(member(ident("info"), "values"), "b"),
        ])],
    )
}

#[test]
fn test_multi_observer_receives_change_info() {
    let lines = logged(vec![
        let_("a", num(1.0)),
        let_("b", num(2.0)),
        observe(&["a", "b"], info_logger()),
        expr_stmt(assign(ident("a"), num(10.0))),
        expr_stmt(assign(ident("b"), num(20.0))),
    ]);
    // Values are captured as of each assignment
    assert_eq!(lines, vec!["a 1 10 10 2", "b 2 20 10 20"]);
}

#[test]
fn test_multi_observer_is_scheduled_like_single_observers() {
    let (mut interp, lines) = interpreter();
    interp
        .execute(&program(vec![
            let_("a", num(1.0)),
            let_("b", num(2.0)),
            observe(&["a", "b"], info_logger()),
            expr_stmt(assign(ident("a"), num(5.0))),
        ]))
        .unwrap();
    assert!(lines.borrow().is_empty());
    interp.run_pending().unwrap();
    assert_eq!(*lines.borrow(), vec!["a 1 5 5 2".to_string()]);
}

#[test]
fn test_multi_observer_registration_is_all_or_nothing() {
    let (mut interp, lines) = interpreter();
    let result = interp.execute(&program(vec![
        let_("a", num(1.0)),
        observe(&["a", "missing"], info_logger()),
    ]));
    assert!(matches!(
        result,
        Err(EvalError::UndeclaredObserveTarget { ref name, .. }) if name == "missing"
    ));

    interp
        .execute(&program(vec![expr_stmt(assign(ident("a"), num(2.0)))]))
        .unwrap();
    interp.run_pending().unwrap();
    assert!(lines.borrow().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Scheduler Integration
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_custom_scheduler_receives_tasks() {
    let queue = Rc::new(RefCell::new(TaskQueue::new()));
    let console = Console::buffered();
    let lines = console.lines();
    let ctx = EvalContext::new()
        .with_console(console)
        .with_scheduler(queue.clone());
    let mut interp = Interpreter::with_context(ctx);

    interp
        .execute(&program(vec![
            let_("x", num(1.0)),
            observe(&["x"], change_logger()),
            expr_stmt(assign(ident("x"), num(2.0))),
            expr_stmt(assign(ident("x"), num(3.0))),
        ]))
        .unwrap();
    assert_eq!(queue.borrow().pending(), 2);

    interp.run_pending().unwrap();
    assert_eq!(queue.borrow().pending(), 0);
    assert_eq!(
        *lines.borrow(),
        vec!["x 1 2".to_string(), "x 2 3".to_string()]
    );
}

#[test]
fn test_interrupt_stops_draining() {
    let (mut interp, lines) = interpreter();
    interp
        .execute(&program(vec![
            let_("x", num(1.0)),
            observe(&["x"], change_logger()),
            expr_stmt(assign(ident("x"), num(2.0))),
        ]))
        .unwrap();
    interp.interrupt();
    assert!(matches!(interp.run_pending(), Err(EvalError::Interrupted)));
    assert!(lines.borrow().is_empty());
}
