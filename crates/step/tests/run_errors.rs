//! Runtime failure tests: every one must stop the program with a
//! `RuntimeError` diagnostic.

use step::{CollectStringPrint, ErrorKind, Exception, run_code};

fn run_err(code: &str) -> (Exception, String) {
    let mut print = CollectStringPrint::new();
    let err = run_code(code, &mut print).expect_err("program should fail");
    (err, print.into_output())
}

fn runtime_err(code: &str) -> Exception {
    let (err, _) = run_err(code);
    assert_eq!(err.kind(), ErrorKind::Runtime, "{err}");
    err
}

#[test]
fn string_division_is_a_type_error() {
    let err = runtime_err("x = \"a\" / \"b\";");
    assert!(err.message().contains("unsupported operand type(s) for /"), "{err}");
    assert!(err.message().contains("'str'"), "{err}");
}

#[test]
fn string_subtraction_is_a_type_error() {
    let err = runtime_err("x = \"a\" - \"b\";");
    assert!(err.message().contains("unsupported operand type(s) for -"), "{err}");
}

#[test]
fn list_plus_number_is_a_type_error() {
    let err = runtime_err("x = [1] + 2;");
    assert!(err.message().contains("'list' and 'int'"), "{err}");
}

#[test]
fn out_of_range_subscript() {
    let err = runtime_err("x = [1, 2][5];");
    assert!(err.message().contains("list index out of range"), "{err}");
    let err = runtime_err("x = \"ab\"[2];");
    assert!(err.message().contains("string index out of range"), "{err}");
    let err = runtime_err("x = [1][-1];");
    assert!(err.message().contains("list index out of range"), "{err}");
}

#[test]
fn non_integral_float_index() {
    let err = runtime_err("x = [1, 2][0.5];");
    assert!(err.message().contains("index must be an integer"), "{err}");
}

#[test]
fn division_and_modulo_by_zero() {
    assert!(runtime_err("x = 6 / 0;").message().contains("division by zero"));
    assert!(runtime_err("x = 6.0 / 0.0;").message().contains("division by zero"));
    assert!(runtime_err("x = 6 % 0;").message().contains("modulo by zero"));
    assert!(runtime_err("x = 6.5 % 0.0;").message().contains("modulo by zero"));
}

#[test]
fn failed_assert_without_message() {
    let (err, output) = run_err("assert(0);");
    assert_eq!(err.kind(), ErrorKind::Runtime);
    assert!(err.message().contains("assertion failed"), "{err}");
    assert_eq!(output, "");
}

#[test]
fn failed_assert_writes_its_message_to_the_sink() {
    let (err, output) = run_err("assert([] , \"empty list is falsy\");");
    assert!(err.message().contains("assertion failed"), "{err}");
    assert_eq!(output, "empty list is falsy\n");
}

#[test]
fn passing_assert_keeps_running() {
    let mut print = CollectStringPrint::new();
    run_code("assert(1, \"never printed\"); print(\"ok\");", &mut print).unwrap();
    assert_eq!(print.into_output(), "ok\n");
}

#[test]
fn unbound_name() {
    let err = runtime_err("print(nope);");
    assert!(err.message().contains("name 'nope' is not defined"), "{err}");
    assert!(err.position().is_some());
}

#[test]
fn control_flow_outside_its_construct() {
    assert!(runtime_err("break;").message().contains("'break' outside loop"));
    assert!(
        runtime_err("continue;")
            .message()
            .contains("'continue' outside loop")
    );
    assert!(
        runtime_err("return 1;")
            .message()
            .contains("'return' outside function")
    );
    // break escaping a function body is still a runtime error
    assert!(
        runtime_err("def f() { break; } f();")
            .message()
            .contains("'break' outside loop")
    );
}

#[test]
fn conversion_errors() {
    assert!(runtime_err("x = int(\"abc\");").message().contains("invalid literal"));
    assert!(runtime_err("x = int([1]);").message().contains("int() argument"));
    assert!(runtime_err("x = sqrt(-1);").message().contains("negative"));
    assert!(runtime_err("x = sqrt(\"4\");").message().contains("sqrt() argument"));
    assert!(runtime_err("x = len(1);").message().contains("has no len()"));
}

#[test]
fn builtin_arity_errors() {
    let err = runtime_err("x = len(\"a\", \"b\");");
    assert!(
        err.message().contains("len() takes exactly one argument (2 given)"),
        "{err}"
    );
    let err = runtime_err("append([1]);");
    assert!(
        err.message().contains("append() takes exactly two arguments (1 given)"),
        "{err}"
    );
    let err = runtime_err("assert();");
    assert!(err.message().contains("assert() takes one or two arguments"), "{err}");
}

#[test]
fn user_function_arity_errors() {
    let err = runtime_err("def f(a) { return a; } f(1, 2);");
    assert!(err.message().contains("f() takes 1 argument (2 given)"), "{err}");
    let err = runtime_err("def g(a, b) { return a; } g(1);");
    assert!(err.message().contains("g() takes 2 arguments (1 given)"), "{err}");
}

#[test]
fn calling_a_non_callable() {
    let err = runtime_err("x = 3; x();");
    assert!(err.message().contains("'int' object is not callable"), "{err}");
}

#[test]
fn subscripting_a_non_sequence() {
    let err = runtime_err("x = 3[0];");
    assert!(err.message().contains("'int' object is not subscriptable"), "{err}");
}

#[test]
fn strings_reject_item_assignment() {
    let err = runtime_err("s = \"ab\"; s[0] = \"c\";");
    assert!(
        err.message().contains("'str' object does not support item assignment"),
        "{err}"
    );
}

#[test]
fn ordering_comparisons_require_numbers() {
    let err = runtime_err("x = \"a\" < 1;");
    assert!(err.message().contains("'<' not supported"), "{err}");
}

#[test]
fn unary_minus_requires_a_number() {
    let err = runtime_err("x = -\"a\";");
    assert!(err.message().contains("bad operand type for unary -"), "{err}");
}

#[test]
fn rendering_a_cyclic_list_fails_cleanly() {
    let err = runtime_err("a = [0]; a[0] = a; print(str(a));");
    assert!(err.message().contains("nesting depth"), "{err}");
}

#[test]
fn runaway_recursion_is_bounded() {
    let err = runtime_err("def f() { return f(); } f();");
    assert!(err.message().contains("maximum recursion depth exceeded"), "{err}");
}

#[test]
fn integer_overflow_is_detected() {
    let err = runtime_err("x = 9223372036854775807 + 1;");
    assert!(err.message().contains("integer overflow"), "{err}");
    let err = runtime_err("x = 9223372036854775807 * 2;");
    assert!(err.message().contains("integer overflow"), "{err}");
}

#[test]
fn runtime_errors_carry_positions() {
    let (err, _) = run_err("x = 1;\ny = x / 0;");
    let position = err.position().expect("position");
    assert_eq!(position.line, 2);
}
