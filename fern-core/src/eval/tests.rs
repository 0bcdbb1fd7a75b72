use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    environment::prelude::{Environment, Object, ObjectKind, FALSE, NULL, TRUE},
    parser::prelude::parse_program,
    utils::prelude::{NullOutput, VectorOutput}
};

use super::Evaluator;

fn eval_with(input: &str, output: &VectorOutput) -> Object {
    let parsed = parse_program(input);

    assert!(!parsed.has_errors(), "parse errors in {input:?}: {:?}", parsed.errors);

    let evaluator = Evaluator::new(Rc::new(output.clone()));

    evaluator.eval_program(&parsed.program, &Environment::new())
}

fn eval(input: &str) -> Object {
    eval_with(input, &VectorOutput::new())
}

fn error(message: &str) -> Object {
    Object::error(message)
}

#[test]
fn test_integer_arithmetic() {
    let cases = [
        ("5", 5),
        ("-10", -10),
        ("5 + 5 * 2 - 10 / 2", 10),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
        ("7 / 2", 3),
        ("-7 / 2", -3),
        ("9223372036854775807 + 1", i64::MIN),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), Object::Integer(expected), "input: {input}");
    }
}

#[test]
fn test_float_promotion() {
    let result = eval("1.1 + 5");

    match result {
        Object::Float(value) => assert!((value - 6.1).abs() < 1e-9),
        other => panic!("expected float, got {other:?}")
    }
    assert_eq!(eval("1.1 + 5").to_string(), "6.100000");

    assert_eq!(eval("5 / 2.0"), Object::Float(2.5));
    assert_eq!(eval("2.5 * 2"), Object::Float(5.0));
    assert_eq!(eval("-1.5"), Object::Float(-1.5));
    assert_eq!(eval("1.5 < 2"), TRUE);
    assert_eq!(eval("2 == 2.0"), TRUE);
}

#[test]
fn test_boolean_expressions() {
    let cases = [
        ("true == true", TRUE),
        ("true == false", FALSE),
        ("true != false", TRUE),
        ("1 < 2 == true", TRUE),
        ("1 <= 1", TRUE),
        ("2 >= 3", FALSE),
        ("true and false", FALSE),
        ("false or true", TRUE),
        ("1 < 2 and 3 > 2", TRUE),
        ("!true", FALSE),
        ("!nil", TRUE),
        ("!5", FALSE),
        ("!!true", TRUE),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), expected, "input: {input}");
    }
}

#[test]
fn test_value_equality() {
    let cases = [
        (r#""a" == "a""#, TRUE),
        (r#""a" != "b""#, TRUE),
        ("nil == nil", TRUE),
        ("[1, 2] == [1, 2]", TRUE),
        ("[1, 2] == [2, 1]", FALSE),
        (r#"1 == "1""#, FALSE),
        ("nil != false", TRUE),
        ("fun f() { } f == f", TRUE),
        ("len == len", TRUE),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), expected, "input: {input}");
    }
}

#[test]
fn test_strings() {
    assert_eq!(eval(r#""foo" + "bar""#), Object::String("foobar".into()));
    assert_eq!(eval(r#"var s = "a"; s + s + s"#), Object::String("aaa".into()));
}

#[test]
fn test_runtime_errors() {
    let cases = [
        (r#"1 + "a""#, "type mismatch: INTEGER + STRING"),
        (r#""a" - "b""#, "unknown operator: STRING - STRING"),
        ("true + false", "unknown operator: BOOLEAN + BOOLEAN"),
        ("1 and 2", "unknown operator: INTEGER and INTEGER"),
        ("1.5 or 2", "unknown operator: FLOAT or INTEGER"),
        ("nil + nil", "unknown operator: NULL + NULL"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("foo", "identifier not found: foo"),
        ("5 / 0", "division by zero"),
        ("var x = 5; x(1)", "not a function: INTEGER"),
        ("fun f(a) { a } f(1, 2)", "wrong number of arguments: expected 1, got 2"),
        ("len()", "wrong number of arguments: expected 1, got 0"),
        ("5[0]", "index operator not supported: INTEGER"),
        ("[1][true]", "index must be INTEGER, got BOOLEAN"),
        ("if (10 > 1) { true + false; 10 }", "unknown operator: BOOLEAN + BOOLEAN"),
        ("fun f() { return 1 + nil; } f()", "type mismatch: INTEGER + NULL"),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), error(expected), "input: {input}");
    }
}

#[test]
fn test_error_stops_evaluation() {
    let output = VectorOutput::new();

    let result = eval_with(r#"[1 + "a", print("inside")]; print("after");"#, &output);

    assert_eq!(result, error("type mismatch: INTEGER + STRING"));
    assert!(output.take().is_empty());
}

#[test]
fn test_if_statements() {
    let cases = [
        ("if (true) { 10 }", Object::Integer(10)),
        ("if (false) { 10 }", NULL),
        ("if (1) { 10 } else { 20 }", Object::Integer(20)),
        ("if (1 < 2) { 10 } else { 20 }", Object::Integer(10)),
        ("if (nil) { 10 }", NULL),
        ("if (true) { }", NULL),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), expected, "input: {input}");
    }
}

#[test]
fn test_while_loops() {
    assert_eq!(eval("var i = 0; while (i < 3) { i = i + 1; } i"), Object::Integer(3));
    assert_eq!(eval("while (false) { 1 }"), NULL);
    assert_eq!(eval("var i = 0; while (i < 2) { i = i + 1; i * 10 }"), Object::Integer(20));
}

#[test]
fn test_var_inside_loop_outlives_it() {
    let input = "var i = 0; while (i < 3) { var last = i; i = i + 1; } last;";

    assert_eq!(eval(input), Object::Integer(2));
}

#[test]
fn test_var_statements() {
    assert_eq!(eval("var a = 5; a + 1;"), Object::Integer(6));
    assert_eq!(eval("var a = 5; var b = a; var c = a + b + 5; c;"), Object::Integer(15));
    assert_eq!(eval("var a; a"), NULL);
    assert_eq!(eval("var a = 1;"), NULL);
    assert_eq!(eval("a = 1; a = a + 1; a"), Object::Integer(2));
}

#[test]
fn test_return_statements() {
    let cases = [
        ("return 10; 9;", Object::Integer(10)),
        ("9; return 2 * 5; 9;", Object::Integer(10)),
        ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", Object::Integer(10)),
        ("fun f() { return; } f();", NULL),
        ("fun f() { 1; 2 } f()", Object::Integer(2)),
        (
            "fun f() { var i = 0; while (true) { i = i + 1; if (i == 5) { return i; } } } f();",
            Object::Integer(5)
        ),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), expected, "input: {input}");
    }
}

#[test]
fn test_functions() {
    assert_eq!(eval("fun a(x, y) { return x + y; } a(2, 3);"), Object::Integer(5));
    assert_eq!(eval("fun f() { }").kind(), ObjectKind::Function);
    assert_eq!(eval("fun f() { }").to_string(), "<fun>");
    assert_eq!(eval("fun f() { } f()"), NULL);

    let fib = "fun fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); } fib(15)";

    assert_eq!(eval(fib), Object::Integer(610));
}

#[test]
fn test_closures() {
    let input = r#"
        fun adder(x) {
            fun inner(y) { return x + y; }
            return inner;
        }
        var add2 = adder(2);
        var add10 = adder(10);
        add2(3) + add10(3);
    "#;

    assert_eq!(eval(input), Object::Integer(18));
}

#[test]
fn test_call_scope_does_not_leak() {
    let input = "var x = 1; fun f(x) { x = 10; var y = 2; return x; } f(5); x";

    assert_eq!(eval(input), Object::Integer(1));
    assert_eq!(eval("fun f() { var y = 2; } f(); y"), error("identifier not found: y"));
}

#[test]
fn test_arrays_and_indexing() {
    let cases = [
        ("[1, 2 * 2, 3 + 3]", Object::Array(vec![
            Object::Integer(1),
            Object::Integer(4),
            Object::Integer(6),
        ])),
        ("[1, 2, 3][0]", Object::Integer(1)),
        ("[1, 2, 3][1 + 1]", Object::Integer(3)),
        ("[1, 2, 3][3]", NULL),
        ("[1, 2, 3][-1]", NULL),
        ("var a = [1, 2 * 2]; a[1] + a[0]", Object::Integer(5)),
        ("[[1, 2], [3]][0][1]", Object::Integer(2)),
    ];

    for (input, expected) in cases {
        assert_eq!(eval(input), expected, "input: {input}");
    }
}

#[test]
fn test_len() {
    assert_eq!(eval(r#"len("hello");"#), Object::Integer(5));
    assert_eq!(eval(r#"len("");"#), Object::Integer(0));
    assert_eq!(eval("len([1, 2, 3]);"), Object::Integer(3));
    assert_eq!(eval("len(5)"), Object::Integer(0));
    assert_eq!(eval(r#"len("a", "b")"#), error("wrong number of arguments: expected 1, got 2"));
}

#[test]
fn test_builtins_resolve_after_environment() {
    assert_eq!(eval("len").to_string(), "<std fun>");
    assert_eq!(eval("var len = 1; len"), Object::Integer(1));
}

#[test]
fn test_print() {
    let output = VectorOutput::new();

    let result = eval_with(r#"print("a", 1, 2.5, [1, "b"], nil); print();"#, &output);

    assert_eq!(result, NULL);
    assert_eq!(output.take(), vec!["a 1 2.500000 [1, b] null".to_string(), String::new()]);
}

#[test]
fn test_read_and_write() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("out.txt");
    let path = path.to_str().expect("utf8 path");

    let input = format!(r#"write("{path}", "hello file"); read("{path}");"#);

    assert_eq!(eval(&input), Object::String("hello file".into()));
    assert_eq!(std::fs::read_to_string(path).expect("written file"), "hello file");
    assert_eq!(eval(&format!(r#"write("{path}", "x")"#)), NULL);
}

#[test]
fn test_read_and_write_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.txt");
    let missing = missing.to_str().expect("utf8 path");

    match eval(&format!(r#"read("{missing}")"#)) {
        Object::Error(message) => assert!(message.starts_with("could not open file: "), "{message}"),
        other => panic!("expected error, got {other:?}")
    }

    assert_eq!(eval("read(1)"), error("filename must be a string"));
    assert_eq!(eval(r#"write(1, "x")"#), error("filename must be a string"));
    assert_eq!(eval(&format!(r#"write("{missing}", 1)"#)), error("data must be a string"));
    assert_eq!(eval(r#"write("a")"#), error("wrong number of arguments: expected 2, got 1"));
}

#[test]
fn test_panic_requests_halt() {
    let output = VectorOutput::new();

    let result = eval_with(r#"panic("bad", 1); print("after");"#, &output);

    assert_eq!(result, error("panic: bad 1"));
    assert_eq!(output.take(), vec!["bad 1".to_string()]);
    assert_eq!(output.halted(), Some(1));
}

#[test]
fn test_same_program_fresh_environment() {
    let parsed = parse_program("var a = 2; fun sq(x) { return x * x; } sq(a) + 1;");
    let evaluator = Evaluator::new(Rc::new(NullOutput));

    let first = evaluator.eval_program(&parsed.program, &Environment::new());
    let second = evaluator.eval_program(&parsed.program, &Environment::new());

    assert_eq!(first, Object::Integer(5));
    assert_eq!(first, second);
}

#[test]
fn test_printed_program_evaluates_the_same() {
    let input = r#"
        var xs = [3, 1.5, "s"];
        fun sum(n) { var total = 0; var i = 1; while (i <= n) { total = total + i; i = i + 1; } return total; }
        if (!(len(xs) != 3) and true) { sum(10) * -2 + xs[0] } else { 0 }
    "#;

    let printed = parse_program(input).program.to_string();

    assert_eq!(eval(input), Object::Integer(-107));
    assert_eq!(eval(&printed), eval(input));
}

#[test]
fn test_environment_persists_between_programs() {
    let env = Environment::new();
    let evaluator = Evaluator::new(Rc::new(NullOutput));

    for line in ["var a = 40;", "fun inc(x) { return x + 1; }"] {
        evaluator.eval_program(&parse_program(line).program, &env);
    }

    let result = evaluator.eval_program(&parse_program("inc(a) + 1").program, &env);

    assert_eq!(result, Object::Integer(42));
}
