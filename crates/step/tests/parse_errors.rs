//! Lex and parse failure tests driving the public runner API.

use step::{CodeLoc, ErrorKind, Exception, Runner};

fn parse_err(code: &str) -> Exception {
    Runner::new(code.to_owned()).expect_err("parsing should fail")
}

fn lex_err(code: &str) -> Exception {
    let err = parse_err(code);
    assert_eq!(err.kind(), ErrorKind::Lex, "{err}");
    err
}

fn syntax_err(code: &str) -> Exception {
    let err = parse_err(code);
    assert_eq!(err.kind(), ErrorKind::Parse, "{err}");
    err
}

#[test]
fn unterminated_string() {
    let err = lex_err("x = \"oops;\nprint(x);");
    assert!(err.message().contains("unterminated string"), "{err}");
    assert_eq!(err.position(), Some(CodeLoc::new(1, 5)));
}

#[test]
fn unrecognized_character() {
    let err = lex_err("x = 1 $ 2;");
    assert!(err.message().contains("unexpected character '$'"), "{err}");
}

#[test]
fn bare_exclamation_mark() {
    let err = lex_err("x = !1;");
    assert!(err.message().contains("unexpected character '!'"), "{err}");
}

#[test]
fn leading_dot_number() {
    let err = lex_err("x = .5;");
    assert!(err.message().contains("unexpected character '.'"), "{err}");
}

#[test]
fn oversized_integer_literal() {
    let err = lex_err("x = 9223372036854775808;");
    assert!(err.message().contains("too large"), "{err}");
}

#[test]
fn chained_comparisons_are_rejected() {
    let err = syntax_err("x = 1 < 2 < 3;");
    assert!(err.message().contains("chained"), "{err}");
    syntax_err("x = 1 == 2 == 3;");
    syntax_err("x = 1 <= 2 > 3;");
}

#[test]
fn missing_semicolon() {
    let err = syntax_err("x = 1\ny = 2;");
    assert!(err.message().contains("expected ';'"), "{err}");
    assert_eq!(err.position(), Some(CodeLoc::new(2, 1)));
}

#[test]
fn unbalanced_delimiters() {
    assert!(syntax_err("x = (1 + 2;").message().contains("expected ')'"));
    assert!(syntax_err("x = [1, 2;").message().contains("expected"));
    assert!(
        syntax_err("if (1) { print(1);")
            .message()
            .contains("expected '}'")
    );
}

#[test]
fn missing_expression() {
    let err = syntax_err("x = 1 + ;");
    assert!(err.message().contains("expected expression"), "{err}");
    let err = syntax_err("x = ;");
    assert!(err.message().contains("expected expression"), "{err}");
}

#[test]
fn malformed_function_definitions() {
    assert!(syntax_err("def { }").message().contains("expected identifier"));
    assert!(syntax_err("def f(,) { }").message().contains("expected identifier"));
    assert!(syntax_err("def f(a { }").message().contains("expected"));
    assert!(
        syntax_err("def f(a, a) { }")
            .message()
            .contains("duplicate parameter 'a'")
    );
}

#[test]
fn control_flow_statements_need_semicolons() {
    assert!(
        syntax_err("while (1) { break }")
            .message()
            .contains("expected ';' after 'break'")
    );
    assert!(
        syntax_err("while (1) { continue }")
            .message()
            .contains("expected ';' after 'continue'")
    );
}

#[test]
fn if_requires_parenthesized_condition() {
    assert!(syntax_err("if 1 { }").message().contains("expected '('"));
    assert!(syntax_err("while 1 { }").message().contains("expected '('"));
}

#[test]
fn assignment_targets_must_be_names_or_subscripts() {
    assert!(syntax_err("1 = 2;").message().contains("invalid assignment target"));
    assert!(syntax_err("f() = 2;").message().contains("invalid assignment target"));
    assert!(
        syntax_err("\"s\" = 2;")
            .message()
            .contains("invalid assignment target")
    );
}

#[test]
fn else_without_block() {
    let err = syntax_err("if (1) { } else print(1);");
    assert!(err.message().contains("expected '{'"), "{err}");
}

#[test]
fn keywords_are_not_expressions() {
    let err = syntax_err("x = while;");
    assert!(err.message().contains("expected expression, found 'while'"), "{err}");
}

#[test]
fn empty_program_is_valid() {
    Runner::new(String::new()).unwrap();
    Runner::new("# only a comment\n".to_owned()).unwrap();
}
