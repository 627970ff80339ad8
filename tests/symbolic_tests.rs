//! Source-level tests for the symbolic-execution mode
//!
//! These focus on the restricted language surface: accepted layouts,
//! flow-insensitive condition accumulation, and the rejection behavior for
//! everything outside the supported grammar.

use algoverify::analysis::dispatch;
use serde_json::{json, Value};

fn run(code: &str) -> Value {
    dispatch(&json!({"algorithmType": "symbolicExecution", "code": code}))
}

#[test]
fn inline_suite_form_parses_and_is_disproved() {
    let body = run("run(x, y): z = x + y; if z < 0: return False; return True");

    assert_eq!(body["valid"], json!(false));
    let cex = body["counterexample"].as_object().unwrap();
    assert!(cex["x"].as_i64().unwrap() + cex["y"].as_i64().unwrap() < 0);
}

#[test]
fn counterexample_is_restricted_to_parameters() {
    // `q` is unbound and becomes a free solver variable, but only declared
    // parameters are reported.
    let body = run("def run(x):\n    if x < q:\n        return True\n    return False\n");

    assert_eq!(body["valid"], json!(false));
    let keys: Vec<&String> = body["counterexample"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["x"]);
}

#[test]
fn elif_condition_joins_the_same_conjunction() {
    // if x < 0 / elif x > 0 conjoin to an unsatisfiable condition.
    let body = run(
        "def run(x):\n    if x < 0:\n        return 0\n    elif x > 0:\n        return 1\n    else:\n        return 2\n",
    );

    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["message"], json!("No logical errors found!"));
}

#[test]
fn loop_bodies_contribute_conditions_but_loop_tests_do_not() {
    // The while test n > 100 is not asserted; only n == 3 inside the body is.
    let body = run(
        "def run(n):\n    while n > 100:\n        if n == 3:\n            return True\n    return False\n",
    );

    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["counterexample"]["n"], json!(3));
}

#[test]
fn assignment_substitution_flows_into_conditions() {
    let body = run(
        "def run(x):\n    z = x * 2\n    if z == 10:\n        return True\n    return False\n",
    );

    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["counterexample"]["x"], json!(5));
}

#[test]
fn function_with_no_branches_is_trivially_disproved() {
    // An empty path condition is satisfiable by any assignment.
    let body = run("def run(x):\n    z = x + 1\n    return z\n");

    assert_eq!(body["valid"], json!(false));
    assert!(body["counterexample"]["x"].is_i64());
}

#[test]
fn chained_comparison_is_a_syntax_error() {
    let body = run("def run(x):\n    if 0 < x < 10:\n        return True\n    return False\n");

    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("chained comparisons"));
    assert!(body.get("valid").is_none());
}

#[test]
fn logical_operator_in_condition_is_unsupported() {
    let body = run("def run(x, y):\n    if x < 0 and y < 0:\n        return True\n    return False\n");

    assert!(body["error"].as_str().unwrap().contains("Unsupported construct"));
}

#[test]
fn inconsistent_indentation_is_a_syntax_error() {
    let body = run("def run(x):\n    z = x\n   q = z\n    return q\n");

    assert!(body["error"].as_str().unwrap().contains("Syntax error"));
}

#[test]
fn source_without_a_function_definition_is_malformed() {
    let body = run("x = 1");

    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("no function definition"));
}

#[test]
fn deeply_nested_expression_is_bounded_not_hung() {
    let mut expr = String::from("x");
    for _ in 0..100 {
        expr = format!("({} + 1)", expr);
    }
    let body = run(&format!(
        "def run(x):\n    if {} < 0:\n        return True\n    return False\n",
        expr
    ));

    assert!(body["error"].as_str().unwrap().contains("depth limit"));
}
