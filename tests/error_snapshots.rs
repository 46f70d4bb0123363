//! Snapshot tests for error message formatting
//!
//! If the format changes intentionally, update the .expected files by running:
//!
//!     UPDATE_SNAPSHOTS=1 cargo test error_snapshots
//!
//! The snapshot files are in tests/snapshots/

use std::fs;

use notary::test_support::{constant, identity, sample_env};
use notary::{
    format_contract_error, format_signature_error, parse_signature, Class, ClassEnv, ErrorConfig,
    Notary, Value,
};

/// Assert that actual output matches snapshot file, or create/update if UPDATE_SNAPSHOTS=1
fn assert_snapshot(actual: &str, snapshot_name: &str) {
    let snapshot_path = format!("tests/snapshots/{}.expected", snapshot_name);

    if std::env::var("UPDATE_SNAPSHOTS").is_ok() {
        fs::write(&snapshot_path, actual).expect("Failed to write snapshot");
        println!("Updated snapshot: {}", snapshot_path);
        return;
    }

    let expected = fs::read_to_string(&snapshot_path).unwrap_or_else(|_| {
        panic!(
            "Snapshot not found: {}\n\
             Run with UPDATE_SNAPSHOTS=1 to create it.\n\
             Actual output:\n{}",
            snapshot_path, actual
        )
    });

    assert_eq!(
        actual, expected,
        "\nSnapshot mismatch for {}\n\
         Run with UPDATE_SNAPSHOTS=1 to update.\n\
         Actual:\n{}\n\
         Expected:\n{}",
        snapshot_name, actual, expected
    );
}

fn plain() -> ErrorConfig {
    ErrorConfig::new(false)
}

fn signature_report(source: &str) -> String {
    let err = parse_signature(source).unwrap_err();
    format_signature_error(&err, source, &plain())
}

// ============================================================================
// Signature Error Snapshots
// ============================================================================

#[test]
fn snapshot_unknown_class() {
    let env = ClassEnv::new()
        .with_class("Ord", Class::predicate(|_| true))
        .unwrap();
    let source = "Ordd a => a -> a";
    let err = Notary::new(env).sign(source, identity).unwrap_err();
    assert_snapshot(
        &format_signature_error(&err, source, &plain()),
        "unknown_class",
    );
}

#[test]
fn unknown_class_without_close_match_has_no_hint() {
    let source = "Monoid a => a -> a";
    let err = Notary::new(sample_env().unwrap())
        .sign(source, identity)
        .unwrap_err();
    let report = format_signature_error(&err, source, &plain());
    assert!(report.starts_with("-- NAME ERROR"));
    assert!(report.contains("`Monoid`"));
    assert!(!report.contains("Did you mean"));
}

#[test]
fn syntax_errors_use_the_signature_header() {
    for source in ["a -> [[b]", "a >- b", "Ord => a -> a", "a -> ()", "a -> $b", ""] {
        let report = signature_report(source);
        assert!(
            report.starts_with("-- SIGNATURE ERROR"),
            "{:?} rendered as\n{}",
            source,
            report
        );
        assert!(report.contains("<signature>:1:"), "{}", report);
    }
}

#[test]
fn syntax_error_messages() {
    assert!(signature_report("a -> $b").contains("'$'"));
    assert!(signature_report("Ord a b => a -> b").contains("`Ord a b`"));
    assert!(signature_report("a -> ()").contains("Hint: write `() -> t`"));
    assert!(signature_report("a").contains("I found 1 type(s)"));
}

#[test]
fn label_replaces_the_default_location() {
    let source = "a -> [b";
    let err = parse_signature(source).unwrap_err();
    let report = format_signature_error(&err, source, &plain().with_label("parse_header"));
    assert!(report.contains("parse_header:1:"));
    assert!(!report.contains("<signature>"));
}

// ============================================================================
// Contract Error Snapshots
// ============================================================================

#[test]
fn snapshot_contract_return_mismatch() {
    let signed = Notary::default()
        .sign("number -> string", constant(Value::from(2)))
        .unwrap();
    let err = signed.call(&[Value::from(1)]).unwrap_err();
    let report = format_contract_error(&err, signed.signature(), &plain().with_label("double"));
    assert_snapshot(&report, "contract_return_mismatch");
}

#[test]
fn inconsistent_variable_names_both_positions() {
    let signed = Notary::default()
        .sign("a -> b -> a", constant(Value::from("x")))
        .unwrap();
    let err = signed.call(&[Value::from(1), Value::from("x")]).unwrap_err();
    let report = format_contract_error(&err, signed.signature(), &plain());
    assert!(report.contains("Type variable `a` must stand for one type."));
    assert!(report.contains("At argument 1 it is:  number"));
    assert!(report.contains("At the return value it is:  string"));
}

#[test]
fn unmet_constraint_points_at_the_argument() {
    let signed = Notary::new(sample_env().unwrap())
        .sign("Positive a => a -> number", constant(Value::from(0)))
        .unwrap();
    let err = signed.call(&[Value::from(-3)]).unwrap_err();
    let report = format_contract_error(&err, signed.signature(), &plain());
    assert!(report.contains("not an instance of `Positive`"));
    assert!(report.contains("argument 1"));
    // caret under the `a` parameter
    assert!(report.contains("1 | Positive a => a -> number\n                  ^\n"));
}

#[test]
fn arity_errors_underline_the_whole_signature() {
    let signed = Notary::default().sign("a -> a", identity).unwrap();
    let err = signed.call(&[]).unwrap_err();
    let report = format_contract_error(&err, signed.signature(), &plain());
    assert!(report.contains("1 | a -> a\n    ^^^^^^\n"));
    assert!(report.contains("expecting 1 value(s)"));
}

#[test]
fn colors_wrap_the_header() {
    let signed = Notary::default().sign("a -> a", identity).unwrap();
    let err = signed.call(&[]).unwrap_err();
    let report = format_contract_error(&err, signed.signature(), &ErrorConfig::new(true));
    assert!(report.starts_with("\x1b[36m-- CONTRACT ERROR"));
}
