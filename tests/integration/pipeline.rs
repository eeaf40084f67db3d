// End-to-end pipeline tests: expression text through generate, compile,
// load, and invoke.

use crate::common::{cc_available, pipeline_eval};
use jitcalc::{evaluate_root, read_expression, Error};

macro_rules! require_cc {
    () => {
        if !cc_available() {
            eprintln!("warning: cc not found, skipping pipeline test");
            return;
        }
    };
}

#[test]
#[cfg(unix)]
fn identity_callback_arithmetic() {
    require_cc!();
    let value = pipeline_eval("2+3*4", "identity").unwrap();
    assert!((value - 14.0).abs() < 1e-9);
}

#[test]
#[cfg(unix)]
fn division_by_zero_yields_zero() {
    require_cc!();
    let value = pipeline_eval("1/0", "identity").unwrap();
    assert_eq!(value, 0.0);
}

#[test]
#[cfg(unix)]
fn division_by_zero_in_subexpression() {
    require_cc!();
    let value = pipeline_eval("3+1/0", "identity").unwrap();
    assert_eq!(value, 3.0);
}

#[test]
#[cfg(unix)]
fn nested_parentheses_and_negation() {
    require_cc!();
    let value = pipeline_eval("((2+3)*(4-1))/3", "identity").unwrap();
    assert!((value - 5.0).abs() < 1e-9);
    let value = pipeline_eval("-(2+3)*-2", "identity").unwrap();
    assert!((value - 10.0).abs() < 1e-9);
}

#[test]
#[cfg(unix)]
fn float_arithmetic_within_tolerance() {
    require_cc!();
    let value = pipeline_eval("0.1+0.2", "identity").unwrap();
    assert!((value - 0.3).abs() < 1e-9);
}

#[test]
#[cfg(unix)]
fn sigmoid_callback_applied_to_result() {
    require_cc!();
    let value = pipeline_eval("0", "sigmoid").unwrap();
    assert!((value - 0.5).abs() < 1e-9);
    let value = pipeline_eval("2-2", "sigmoid").unwrap();
    assert!((value - 0.5).abs() < 1e-9);
}

#[test]
#[cfg(unix)]
fn pipeline_matches_direct_evaluation() {
    require_cc!();
    let expressions = [
        "1",
        "-4.5",
        "2+3*4",
        "10-3-2",
        "16/4/2",
        "(2+3)*(4-1)",
        "1/3",
        "2*-3+10",
        "1e2/4",
        "5/0+7",
    ];
    for expr in expressions {
        let dag = read_expression(expr).unwrap();
        let expected = evaluate_root(&dag).unwrap();
        let value = pipeline_eval(expr, "identity").unwrap();
        assert!(
            (value - expected).abs() < 1e-9,
            "pipeline disagrees with direct eval for '{}': {} vs {}",
            expr,
            value,
            expected
        );
    }
}

#[test]
#[cfg(unix)]
fn intermediate_files_are_cleaned_up() {
    require_cc!();
    let dir = tempfile::tempdir().unwrap();
    let registry = jitcalc::CallbackRegistry::with_builtins();
    let config = jitcalc::PipelineConfig::in_dir(dir.path());

    let value = jitcalc::evaluate_expression("6*7", "identity", &registry, &config).unwrap();
    assert!((value - 42.0).abs() < 1e-9);
    assert!(!config.source_path.exists());
    assert!(!config.module_path.exists());
}

#[test]
fn unknown_callback_is_reported() {
    let err = pipeline_eval("1+1", "softmax").unwrap_err();
    assert!(matches!(err, Error::UnknownCallback { .. }));
    assert_eq!(err.to_string(), "unknown callback 'softmax'");
}

#[test]
fn empty_expression_is_reported() {
    let err = pipeline_eval("", "identity").unwrap_err();
    assert_eq!(err, Error::EmptyExpression);
}

#[test]
fn parse_error_is_reported() {
    let err = pipeline_eval("2++", "identity").unwrap_err();
    assert!(matches!(err, Error::Read(_)));
}
