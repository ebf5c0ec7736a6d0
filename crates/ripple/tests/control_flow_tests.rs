//! Statement and control-flow tests

use pretty_assertions::assert_eq;
use ripple::ast::build::*;
use ripple::ast::{BinaryOp, DeclKind, Stmt};
use ripple::{Console, EvalContext, EvalError, Interpreter, Value};

// Run statements; return the result and everything logged
fn run(stmts: Vec<Stmt>) -> (Result<Value, EvalError>, Vec<String>) {
    let console = Console::buffered();
    let lines = console.lines();
    let mut interp = Interpreter::with_context(EvalContext::new().with_console(console));
    let result = interp.run(&program(stmts));
    let lines = lines.borrow().clone();
    (result, lines)
}

fn logged(stmts: Vec<Stmt>) -> Vec<String> {
    let (result, lines) = run(stmts);
    result.unwrap();
    lines
}

fn incr(name: &str) -> Stmt {
    expr_stmt(post_inc(ident(name)))
}

// ═══════════════════════════════════════════════════════════════════════
// Blocks and Scoping
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_block_shadowing_restores_outer_binding() {
    let lines = logged(vec![
        let_("x", num(1.0)),
        block(vec![let_("x", num(2.0)), log(vec![ident("x")])]),
        log(vec![ident("x")]),
    ]);
    assert_eq!(lines, vec!["2", "1"]);
}

#[test]
fn test_block_binding_invisible_after_block() {
    let (result, _) = run(vec![
        block(vec![let_("inner", num(1.0))]),
        expr_stmt(ident("inner")),
    ]);
    assert!(matches!(result, Err(EvalError::UnknownIdentifier { .. })));
}

#[test]
fn test_var_escapes_block_to_enclosing_function_scope() {
    let lines = logged(vec![
        block(vec![var_("v", num(3.0))]),
        log(vec![ident("v")]),
    ]);
    assert_eq!(lines, vec!["3"]);
}

#[test]
fn test_const_reassignment_fails() {
    let (result, _) = run(vec![
        const_("c", num(1.0)),
        expr_stmt(assign(ident("c"), num(2.0))),
    ]);
    assert!(matches!(
        result,
        Err(EvalError::ConstAssignment { ref name, .. }) if name == "c"
    ));
}

#[test]
fn test_const_rejects_compound_assignment_and_update() {
    let writes = vec![
        compound(BinaryOp::Add, ident("c"), num(1.0)),
        post_inc(ident("c")),
        pre_dec(ident("c")),
    ];
    for write in writes {
        let (result, _) = run(vec![const_("c", num(1.0)), expr_stmt(write)]);
        assert!(
            matches!(
                result,
                Err(EvalError::ConstAssignment { ref name, .. }) if name == "c"
            ),
            "{:?}",
            result
        );
    }
}

#[test]
fn test_assignment_to_undeclared_is_strict() {
    let (result, _) = run(vec![expr_stmt(assign(ident("ghost"), num(1.0)))]);
    assert!(matches!(
        result,
        Err(EvalError::UndeclaredAssignment { ref name, .. }) if name == "ghost"
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// when / otherwise
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_first_matching_when_wins() {
    let lines = logged(vec![
        let_("n", num(7.0)),
        when(lt(ident("n"), num(5.0)), vec![log(vec![string("small")])]),
        when(lt(ident("n"), num(10.0)), vec![log(vec![string("medium")])]),
        when(lt(ident("n"), num(100.0)), vec![log(vec![string("large")])]),
        otherwise(vec![log(vec![string("huge")])]),
        log(vec![string("after")]),
    ]);
    assert_eq!(lines, vec!["medium"]);
}

#[test]
fn test_otherwise_runs_when_no_guard_matches() {
    let lines = logged(vec![
        let_("n", num(500.0)),
        when(lt(ident("n"), num(5.0)), vec![log(vec![string("small")])]),
        otherwise(vec![log(vec![string("huge")])]),
        log(vec![string("after")]),
    ]);
    assert_eq!(lines, vec!["huge", "after"]);
}

#[test]
fn test_when_guards_inside_function_body() {
    let lines = logged(vec![
        function(
            "classify",
            &["n"],
            vec![
                when(lt(ident("n"), num(0.0)), vec![return_(string("negative"))]),
                when(strict_eq(ident("n"), num(0.0)), vec![return_(string("zero"))]),
                otherwise(vec![return_(string("positive"))]),
            ],
        ),
        log(vec![
            call(ident("classify"), vec![num(-2.0)]),
            call(ident("classify"), vec![num(0.0)]),
            call(ident("classify"), vec![num(9.0)]),
        ]),
    ]);
    assert_eq!(lines, vec!["negative zero positive"]);
}

#[test]
fn test_fired_when_ends_only_its_own_block() {
    let lines = logged(vec![
        block(vec![
            when(boolean(true), vec![log(vec![string("inner")])]),
            log(vec![string("skipped")]),
        ]),
        log(vec![string("outer continues")]),
    ]);
    assert_eq!(lines, vec!["inner", "outer continues"]);
}

#[test]
fn test_when_body_has_its_own_scope() {
    let (result, _) = run(vec![
        block(vec![when(boolean(true), vec![let_("w", num(1.0))])]),
        expr_stmt(ident("w")),
    ]);
    assert!(matches!(result, Err(EvalError::UnknownIdentifier { .. })));
}

// ═══════════════════════════════════════════════════════════════════════
// if / loops
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_if_else() {
    let lines = logged(vec![
        let_("x", num(3.0)),
        if_(
            lt(ident("x"), num(2.0)),
            block(vec![log(vec![string("lt")])]),
            Some(block(vec![log(vec![string("ge")])])),
        ),
    ]);
    assert_eq!(lines, vec!["ge"]);
}

#[test]
fn test_while_with_break_and_continue() {
    // let i = 0; while (true) { i++; if (i === 2) continue; if (i > 4) break; log(i) }
    let lines = logged(vec![
        let_("i", num(0.0)),
        while_(
            boolean(true),
            block(vec![
                incr("i"),
                if_(strict_eq(ident("i"), num(2.0)), continue_(), None),
                if_(binary(BinaryOp::Gt, ident("i"), num(4.0)), break_(), None),
                log(vec![ident("i")]),
            ]),
        ),
    ]);
    assert_eq!(lines, vec!["1", "3", "4"]);
}

#[test]
fn test_do_while_runs_body_once() {
    let lines = logged(vec![do_while(
        block(vec![log(vec![string("once")])]),
        boolean(false),
    )]);
    assert_eq!(lines, vec!["once"]);
}

#[test]
fn test_for_loop_continue_runs_update() {
    let lines = logged(vec![for_(
        Some(let_("i", num(0.0))),
        Some(lt(ident("i"), num(4.0))),
        Some(post_inc(ident("i"))),
        block(vec![
            if_(
                strict_eq(binary(BinaryOp::Rem, ident("i"), num(2.0)), num(1.0)),
                continue_(),
                None,
            ),
            log(vec![ident("i")]),
        ]),
    )]);
    assert_eq!(lines, vec!["0", "2"]);
}

#[test]
fn test_for_loop_accumulates_total() {
    let (result, _) = run(vec![
        let_("total", num(0.0)),
        for_(
            Some(let_("i", num(0.0))),
            Some(lt(ident("i"), num(5.0))),
            Some(assign(ident("i"), add(ident("i"), num(1.0)))),
            block(vec![expr_stmt(assign(
                ident("total"),
                add(ident("total"), ident("i")),
            ))]),
        ),
        expr_stmt(strict_eq(ident("total"), num(10.0))),
    ]);
    assert_eq!(result.unwrap(), Value::Bool(true));
}

#[test]
fn test_for_loop_variable_is_scoped_to_loop() {
    let (result, _) = run(vec![
        for_(
            Some(let_("i", num(0.0))),
            Some(lt(ident("i"), num(1.0))),
            Some(post_inc(ident("i"))),
            block(vec![]),
        ),
        expr_stmt(ident("i")),
    ]);
    assert!(matches!(result, Err(EvalError::UnknownIdentifier { .. })));
}

#[test]
fn test_for_of_list_and_string() {
    let lines = logged(vec![
        for_of(
            Some(DeclKind::Const),
            "item",
            array(vec![num(1.0), string("two")]),
            block(vec![log(vec![ident("item")])]),
        ),
        for_of(
            Some(DeclKind::Let),
            "ch",
            string("hi"),
            block(vec![log(vec![ident("ch")])]),
        ),
    ]);
    assert_eq!(lines, vec!["1", "two", "h", "i"]);
}

#[test]
fn test_for_of_record_is_not_iterable() {
    let (result, _) = run(vec![for_of(
        Some(DeclKind::Let),
        "x",
        object(vec![("a", num(1.0))]),
        block(vec![]),
    )]);
    assert!(matches!(
        result,
        Err(EvalError::NotIterable { ref type_name, .. }) if type_name == "record"
    ));
}

#[test]
fn test_for_in_record_keys_in_insertion_order() {
    let lines = logged(vec![for_in(
        Some(DeclKind::Let),
        "key",
        object(vec![("b", num(1.0)), ("a", num(2.0))]),
        block(vec![log(vec![ident("key")])]),
    )]);
    assert_eq!(lines, vec!["b", "a"]);
}

#[test]
fn test_for_in_list_yields_index_strings() {
    let (result, _) = run(vec![
        let_("keys", string("")),
        for_in(
            Some(DeclKind::Let),
            "k",
            array(vec![num(5.0), num(6.0)]),
            block(vec![expr_stmt(compound(BinaryOp::Add, ident("keys"), ident("k")))]),
        ),
        expr_stmt(ident("keys")),
    ]);
    assert_eq!(result.unwrap(), Value::string("01"));
}

#[test]
fn test_for_of_without_declaration_reuses_variable() {
    let (result, _) = run(vec![
        let_("last", null()),
        for_of(None, "last", array(vec![num(1.0), num(2.0)]), block(vec![])),
        expr_stmt(ident("last")),
    ]);
    assert_eq!(result.unwrap(), Value::Number(2.0));
}

#[test]
fn test_return_from_nested_loops() {
    let lines = logged(vec![
        function(
            "find",
            &[],
            vec![
                for_of(
                    Some(DeclKind::Const),
                    "row",
                    array(vec![array(vec![num(1.0), num(2.0)]), array(vec![num(3.0)])]),
                    block(vec![for_of(
                        Some(DeclKind::Const),
                        "x",
                        ident("row"),
                        block(vec![if_(
                            strict_eq(ident("x"), num(2.0)),
                            return_(ident("x")),
                            None,
                        )]),
                    )]),
                ),
                return_(num(-1.0)),
            ],
        ),
        log(vec![call(ident("find"), vec![])]),
    ]);
    assert_eq!(lines, vec!["2"]);
}

#[test]
fn test_break_outside_loop_is_error() {
    let (result, _) = run(vec![block(vec![break_()])]);
    assert!(matches!(result, Err(EvalError::BreakOutsideLoop { .. })));
}

// ═══════════════════════════════════════════════════════════════════════
// switch
// ═══════════════════════════════════════════════════════════════════════

fn switch_on(value: f64) -> Vec<String> {
    logged(vec![switch(
        num(value),
        vec![
            case(num(1.0), vec![log(vec![string("one")])]),
            case(num(2.0), vec![log(vec![string("two")])]),
            case(num(3.0), vec![log(vec![string("three")]), break_()]),
            default_case(vec![log(vec![string("default")])]),
        ],
    )])
}

#[test]
fn test_switch_falls_through_until_break() {
    assert_eq!(switch_on(1.0), vec!["one", "two", "three"]);
    assert_eq!(switch_on(3.0), vec!["three"]);
    assert_eq!(switch_on(9.0), vec!["default"]);
}

#[test]
fn test_switch_falls_through_into_default() {
    let lines = logged(vec![switch(
        num(1.0),
        vec![
            case(num(1.0), vec![log(vec![string("one")])]),
            case(num(2.0), vec![log(vec![string("two")])]),
            default_case(vec![log(vec![string("default")])]),
        ],
    )]);
    assert_eq!(lines, vec!["one", "two", "default"]);
}

#[test]
fn test_switch_uses_strict_equality() {
    let lines = logged(vec![switch(
        string("1"),
        vec![
            case(num(1.0), vec![log(vec![string("number")]), break_()]),
            case(string("1"), vec![log(vec![string("string")]), break_()]),
        ],
    )]);
    assert_eq!(lines, vec!["string"]);
}

#[test]
fn test_continue_inside_switch_targets_loop() {
    let lines = logged(vec![for_of(
        Some(DeclKind::Const),
        "n",
        array(vec![num(1.0), num(2.0)]),
        block(vec![
            switch(ident("n"), vec![case(num(1.0), vec![continue_()])]),
            log(vec![ident("n")]),
        ]),
    )]);
    assert_eq!(lines, vec!["2"]);
}

// ═══════════════════════════════════════════════════════════════════════
// try / catch / finally
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_catch_binds_thrown_value() {
    let lines = logged(vec![try_catch(
        vec![throw_(object(vec![("code", num(42.0))]))],
        "e",
        vec![log(vec![member(ident("e"), "code")])],
    )]);
    assert_eq!(lines, vec!["42"]);
}

#[test]
fn test_catch_receives_message_of_runtime_error() {
    let lines = logged(vec![try_catch(
        vec![expr_stmt(member(null(), "x"))],
        "e",
        vec![log(vec![ident("e")])],
    )]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("`x`"), "{}", lines[0]);
}

#[test]
fn test_finally_runs_on_every_path() {
    let lines = logged(vec![
        try_(
            vec![log(vec![string("body")])],
            None,
            Some(vec![log(vec![string("finally 1")])]),
        ),
        try_(
            vec![throw_(string("boom"))],
            Some((Some("e"), vec![log(vec![ident("e")])])),
            Some(vec![log(vec![string("finally 2")])]),
        ),
        function(
            "early",
            &[],
            vec![try_(
                vec![return_(num(1.0))],
                None,
                Some(vec![log(vec![string("finally 3")])]),
            )],
        ),
        log(vec![call(ident("early"), vec![])]),
    ]);
    assert_eq!(
        lines,
        vec!["body", "finally 1", "boom", "finally 2", "finally 3", "1"]
    );
}

#[test]
fn test_finally_return_overrides_try_return() {
    let lines = logged(vec![
        function(
            "f",
            &[],
            vec![try_(
                vec![return_(string("try"))],
                None,
                Some(vec![return_(string("finally"))]),
            )],
        ),
        log(vec![call(ident("f"), vec![])]),
    ]);
    assert_eq!(lines, vec!["finally"]);
}

#[test]
fn test_uncaught_error_propagates_through_finally() {
    let (result, lines) = run(vec![try_(
        vec![throw_(string("boom"))],
        None,
        Some(vec![log(vec![string("cleanup")])]),
    )]);
    assert_eq!(lines, vec!["cleanup"]);
    assert!(matches!(result, Err(EvalError::UserThrown { .. })));
}

#[test]
fn test_finally_error_is_swallowed_while_propagating() {
    let (result, _) = run(vec![try_(
        vec![throw_(string("original"))],
        None,
        Some(vec![throw_(string("from finally"))]),
    )]);
    match result {
        Err(EvalError::UserThrown { value, .. }) => assert_eq!(value, Value::string("original")),
        other => panic!("expected original error, got {:?}", other),
    }
}

#[test]
fn test_finally_error_propagates_after_clean_try() {
    let (result, _) = run(vec![try_(
        vec![],
        None,
        Some(vec![throw_(string("from finally"))]),
    )]);
    match result {
        Err(EvalError::UserThrown { value, .. }) => {
            assert_eq!(value, Value::string("from finally"))
        }
        other => panic!("expected finally error, got {:?}", other),
    }
}

#[test]
fn test_catch_parameter_is_scoped_to_handler() {
    let (result, _) = run(vec![
        try_catch(vec![throw_(num(1.0))], "err", vec![]),
        expr_stmt(ident("err")),
    ]);
    assert!(matches!(result, Err(EvalError::UnknownIdentifier { .. })));
}
