use std::{
    fs,
    io::{self, Write},
};

use pretty_assertions::assert_eq;
use walkdir::WalkDir;
use xlang::{Gate, InterpretError, get_result, get_result_with, interpreter::value::core::Value};

/// Runs every `tests/scripts/*.x` program and compares what it produced with
/// the sibling `.out` file. A run stopped by a phase gate produces its
/// diagnostics, one per line.
#[test]
fn scripts_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "x"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read {expected_path:?}: {e}"));

        let mut out = Vec::new();
        let actual = match get_result(&source, &mut out) {
            Ok(_) => String::from_utf8(out).unwrap(),
            Err(e) => match e.diagnostics() {
                Some(diagnostics) => format!("{diagnostics}\n"),
                None => panic!("Script {path:?} failed to write its output: {e}"),
            },
        };

        assert_eq!(actual, expected, "output of {path:?} differs");
        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn assert_output(src: &str, expected: &str) {
    let mut out = Vec::new();
    if let Err(e) = get_result(src, &mut out) {
        panic!("Script failed: {e}");
    }
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

fn assert_diagnostics(src: &str, expected: &[&str]) {
    let mut out = Vec::new();
    let Err(e) = get_result(src, &mut out) else {
        panic!("Script succeeded but was expected to stop")
    };
    let Some(diagnostics) = e.diagnostics() else {
        panic!("Script stopped without diagnostics: {e}")
    };

    assert_eq!(diagnostics.messages(), expected);
    assert!(out.is_empty(), "nothing should run after a phase gate stops");
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_output("x = 1 + 2\nx", "3\n");
    assert_output("x = 7 * 9\nx", "63\n");
    assert_output("x = 8 - 5\nx", "3\n");
    assert_output("x = 10 / 2\nx", "5\n");
    assert_output("x = 2 ^ 8\nx", "256\n");
}

#[test]
fn additive_operators_split_first() {
    assert_output("2 + 3 * 4", "14\n");
    assert_output("(2 + 3) * 4", "20\n");
    assert_output("10 - 2 - 3", "5\n");
    assert_output("2 * 3 ^ 2", "18\n");
    assert_output("7 * 3 % 4", "21\n");
}

#[test]
fn integer_results_are_truncated() {
    assert_output("10 / 4", "2\n");
    assert_output("10.0 / 4", "2.5\n");
    assert_output("-7 / 2", "-3\n");
    assert_output("2 ^ -1", "0\n");
    assert_output("2.0 ^ -1", "0.5\n");
}

#[test]
fn print_traces_each_binary_step() {
    assert_output("x = 20 + 4\nprint ((x + 20) * 2) + 5",
                  "(24 + 20) = 44\n(44 * 2) = 88\n(88 + 5) = 93\n93\n");
    assert_output("print 1.5 * 2", "(1.5 * 2) = 3\n3\n");
    assert_output("print 7", "7\n");
}

#[test]
fn keyword_needs_a_word_boundary() {
    assert_output("print2", "2\n");
    assert_output("printer = 3\nprinter + 1", "4\n");
    assert_output("print_x = 5\nprint_x", "5\n");
}

#[test]
fn variable_names_may_use_any_script() {
    assert_output("größe = 3\nprint größe * 2\n-größe", "(3 * 2) = 6\n6\n-3\n");
}

#[test]
fn store_survives_runtime_errors() {
    let mut out = Vec::new();
    let outcome = get_result("a = 5\nb = a / 0\nc = a * 2", &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "division by zero\n");
    assert_eq!(outcome.store.len(), 2);
    assert_eq!(outcome.store.get("b"), None);
    assert_eq!(outcome.store.get("c"), Some(Value::Integer(10)));
}

#[test]
fn runtime_errors_are_written_to_the_output() {
    assert_output("print y + 1", "undefined variable: y\n");
    assert_output("9223372036854775807 + 1", "integer overflow\n");
    assert_output("99999999999999999999", "integer overflow\n");
    assert_output("9007199254740993 * 1.0",
                  "integer too large to convert to a real number: 9007199254740993\n");
}

#[test]
fn lexical_problems_stop_before_building() {
    assert_diagnostics("print (1 + 2", &["waiting parentheses to close"]);
    assert_diagnostics("1 + 2)", &["1:6 extra closed parentheses"]);
    assert_diagnostics("x = 12.", &["invalid token: 1", "invalid token: 2", "invalid token: ."]);
    assert_diagnostics("a = 1\nb = a @ 2", &["invalid token: @"]);
}

#[test]
fn syntax_problems_stop_before_evaluating() {
    assert_diagnostics("print 1\n1 2 3\nprint 2", &["2:5 invalid syntax"]);
    assert_diagnostics("x =\nprint", &["1:3 expression missing", "2:1 expression missing"]);
}

#[test]
fn keep_going_runs_what_could_be_built() {
    let mut out = Vec::new();
    let outcome = get_result_with("1 2 3\nx = 4\nprint x * 2", &mut out, Gate::KeepGoing).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "(4 * 2) = 8\n8\n");
    assert_eq!(outcome.diagnostics.messages(), vec!["1:5 invalid syntax"]);
    assert_eq!(outcome.store.get("x"), Some(Value::Integer(4)));
}

#[test]
fn keep_going_past_invalid_characters() {
    let mut out = Vec::new();
    let outcome = get_result_with("x = 4 $\nprint x", &mut out, Gate::KeepGoing).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "4\n");
    assert_eq!(outcome.diagnostics.messages(), vec!["invalid token: $"]);
}

#[test]
fn long_operator_chains_run_to_completion() {
    assert_output(&vec!["1"; 20_000].join(" + "), "20000\n");
    assert_output(&vec!["2"; 5_000].join(" / "), "0\n");

    let nested = format!("{}7{}", "(".repeat(5_000), ")".repeat(5_000));
    assert_output(&format!("x = {nested}\nx * 2"), "14\n");
}

struct ClosedOutput;

impl Write for ClosedOutput {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn output_failures_abort_the_run() {
    let result = get_result("x = 1\nx\nx = 2", &mut ClosedOutput);

    assert!(matches!(result, Err(InterpretError::Io(_))));
}
