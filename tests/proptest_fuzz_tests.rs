//! Property-based fuzzing for the source-language front end
//!
//! These tests generate random inputs and verify that:
//! 1. The scanner never panics on arbitrary input
//! 2. The parser and model builder reject garbage gracefully
//! 3. Well-formed straight-line functions always compile

use algoverify::lexer::Scanner;
use algoverify::logic::Term;
use algoverify::parser::FuncParser;
use algoverify::translate::ProgramModel;
use proptest::prelude::*;

/// Generate arbitrary printable strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[ -~\n\t]{0,300}").unwrap()
}

/// Generate token soups from the language's own vocabulary
fn token_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(language_token(), 0..40).prop_map(|tokens| tokens.join(" "))
}

fn language_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("def".to_string()),
        Just("if".to_string()),
        Just("elif".to_string()),
        Just("else".to_string()),
        Just("while".to_string()),
        Just("for".to_string()),
        Just("in".to_string()),
        Just("return".to_string()),
        Just("pass".to_string()),
        Just("True".to_string()),
        Just("False".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(":".to_string()),
        Just(",".to_string()),
        Just(";".to_string()),
        Just("+".to_string()),
        Just("-".to_string()),
        Just("*".to_string()),
        Just("/".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        Just("==".to_string()),
        Just("!=".to_string()),
        Just("=".to_string()),
        Just("\n".to_string()),
        "[a-z]{1,6}",
        (-1000i64..1000i64).prop_map(|n| n.to_string()),
    ]
}

/// Generate small well-formed straight-line function bodies
fn straight_line_function() -> impl Strategy<Value = String> {
    let name = prop_oneof![
        Just("z".to_string()),
        Just("w".to_string()),
        Just("acc".to_string()),
        Just("tmp".to_string()),
    ];
    let op = prop_oneof![Just("+"), Just("-"), Just("*")];
    let assignment = (name, 0i64..100i64, op)
        .prop_map(|(name, n, op)| format!("    {} = x {} {}\n", name, op, n));

    prop::collection::vec(assignment, 1..6)
        .prop_map(|lines| format!("def run(x):\n{}    return x\n", lines.join("")))
}

proptest! {
    #[test]
    fn scanner_never_panics(source in arbitrary_source_string()) {
        let _ = Scanner::new(&source).scan_tokens();
    }

    #[test]
    fn parser_never_panics_on_token_soup(source in token_soup()) {
        if let Ok(tokens) = Scanner::new(&source).scan_tokens() {
            let _ = FuncParser::new(tokens).parse();
        }
    }

    #[test]
    fn model_builder_never_panics(source in arbitrary_source_string()) {
        if let Ok(tokens) = Scanner::new(&source).scan_tokens() {
            if let Ok(function) = FuncParser::new(tokens).parse() {
                let _ = ProgramModel::build(&function);
            }
        }
    }

    #[test]
    fn straight_line_functions_compile_with_a_trivial_path_condition(
        source in straight_line_function()
    ) {
        let tokens = Scanner::new(&source).scan_tokens().unwrap();
        let function = FuncParser::new(tokens).parse().unwrap();
        let model = ProgramModel::build(&function).unwrap();

        prop_assert_eq!(model.path_condition, Term::BoolLiteral(true));
        prop_assert_eq!(model.params, vec!["x".to_string()]);
    }

    #[test]
    fn model_building_is_deterministic(source in token_soup()) {
        let first = Scanner::new(&source)
            .scan_tokens()
            .and_then(|t| FuncParser::new(t).parse())
            .and_then(|f| ProgramModel::build(&f));
        let second = Scanner::new(&source)
            .scan_tokens()
            .and_then(|t| FuncParser::new(t).parse())
            .and_then(|f| ProgramModel::build(&f));
        prop_assert_eq!(first, second);
    }
}
