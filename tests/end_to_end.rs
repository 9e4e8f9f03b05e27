//! End-to-end coverage: the concrete scenarios from the specification's
//! testable-properties section, plus the CLI driver exercised as a
//! subprocess via `assert_cmd`.

use assert_cmd::Command;
use jsonlogic_engine::apply_json;
use predicates::prelude::*;
use serde_json::json;

#[test]
fn scenario_simple_equality() {
    assert_eq!(apply_json(&json!({"==": [1, 1]}), &json!({})).unwrap(), json!(true));
}

#[test]
fn scenario_variadic_add() {
    assert_eq!(apply_json(&json!({"+": [1, 2, 3]}), &json!({})).unwrap(), json!(6));
}

#[test]
fn scenario_conditional_branches() {
    let rule = json!({"if": [{"<": [{"var": "x"}, 10]}, "small", "big"]});
    assert_eq!(apply_json(&rule, &json!({"x": 3})).unwrap(), json!("small"));
    assert_eq!(apply_json(&rule, &json!({"x": 42})).unwrap(), json!("big"));
}

#[test]
fn scenario_map_doubles_each_element() {
    let rule = json!({"map": [{"var": "xs"}, {"*": [{"var": ""}, 2]}]});
    let result = apply_json(&rule, &json!({"xs": [1, 2, 3]})).unwrap();
    assert_eq!(result, json!([2, 4, 6]));
}

#[test]
fn scenario_reduce_sums_elements() {
    let rule = json!({
        "reduce": [
            {"var": "xs"},
            {"+": [{"var": "accumulator"}, {"var": "current"}]},
            0
        ]
    });
    let result = apply_json(&rule, &json!({"xs": [1, 2, 3, 4]})).unwrap();
    assert_eq!(result, json!(10));
}

#[test]
fn scenario_missing_reports_absent_paths() {
    let result = apply_json(&json!({"missing": ["a", "b"]}), &json!({"a": 1})).unwrap();
    assert_eq!(result, json!(["b"]));
}

#[test]
fn scenario_singleton_array_unwraps_for_equality() {
    assert_eq!(apply_json(&json!({"==": [[1], 1]}), &json!({})).unwrap(), json!(true));
    assert_eq!(apply_json(&json!({"==": [[1, 2], 1]}), &json!({})).unwrap(), json!(false));
}

#[test]
fn scenario_substr_with_negative_offsets() {
    assert_eq!(apply_json(&json!({"substr": ["hello", -3]}), &json!({})).unwrap(), json!("llo"));
    assert_eq!(
        apply_json(&json!({"substr": ["hello", 1, -1]}), &json!({})).unwrap(),
        json!("ell")
    );
}

#[test]
fn scenario_substr_with_single_operand_returns_whole_string() {
    assert_eq!(apply_json(&json!({"substr": "hello"}), &json!({})).unwrap(), json!("hello"));
}

#[test]
fn cli_eval_prints_the_result() {
    Command::cargo_bin("jsonlogic-eval")
        .unwrap()
        .args(["eval", "--rule", r#"{"+": [1, 2, 3]}"#, "--data", "{}"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result: 6"));
}

#[test]
fn cli_eval_reports_errors_and_exits_nonzero() {
    Command::cargo_bin("jsonlogic-eval")
        .unwrap()
        .args(["eval", "--rule", r#"{"frobnicate": [1]}"#, "--data", "{}"])
        .assert()
        .failure();
}

#[test]
fn cli_translate_prints_variable_table() {
    Command::cargo_bin("jsonlogic-eval")
        .unwrap()
        .args(["translate", "--rule", r#"{"==": [{"var": "a"}, 1]}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("[0] a"));
}

#[test]
fn cli_test_runs_a_suite_file() {
    let dir = tempdir();
    let suite_path = dir.join("suite.json");
    std::fs::write(
        &suite_path,
        r#"{
            "name": "basic arithmetic",
            "tests": [
                {"description": "adds", "rule": {"+": [1, 2]}, "data": {}, "expected": 3}
            ]
        }"#,
    )
    .unwrap();

    Command::cargo_bin("jsonlogic-eval")
        .unwrap()
        .arg("test")
        .arg(&suite_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 passed, 0 failed"));
}

fn tempdir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("jsonlogic-engine-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
