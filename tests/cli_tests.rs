//! Binary smoke tests for the `outlay` CLI.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_input(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("create temp input");
    file.write_all(contents.as_bytes()).expect("write input");
    file
}

const FEASIBLE_INPUT: &str = r#"{
    "start_date": "2023-01-01",
    "budget": {
        "initial": 1000,
        "recorrent": 1000,
        "recurrence": 30,
        "last_recurrence": "2023-01-01",
        "iterations": 1
    },
    "expenses": [{
        "description": "Item 01",
        "due_date": "2023-01-31",
        "priority": 3,
        "mandatory": false,
        "range": { "minimum": 900, "maximum": 1200, "target": 1000 }
    }],
    "optimization_parameters": {
        "priority_exponent": 2.0,
        "deviation_weight": 0.0,
        "max_time": 1000.0
    }
}"#;

const INFEASIBLE_INPUT: &str = r#"{
    "start_date": "2023-01-01",
    "budget": {
        "initial": 100,
        "recorrent": 500,
        "recurrence": 30,
        "last_recurrence": "2023-01-01",
        "iterations": 1
    },
    "expenses": [{
        "description": "Item 01",
        "due_date": "2023-01-31",
        "priority": 3,
        "mandatory": true,
        "range": { "minimum": 900, "maximum": 1200, "target": 1000 }
    }],
    "optimization_parameters": {
        "priority_exponent": 2.0,
        "deviation_weight": 0.0,
        "max_time": 1000.0
    }
}"#;

#[test]
fn feasible_input_prints_success_report() {
    let input = write_input(FEASIBLE_INPUT);

    Command::cargo_bin("outlay")
        .unwrap()
        .arg(input.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": 0"#))
        .stdout(predicate::str::contains("Item 01"))
        .stdout(predicate::str::contains(r#""error": """#));
}

#[test]
fn infeasible_input_still_exits_zero_with_failure_report() {
    let input = write_input(INFEASIBLE_INPUT);

    Command::cargo_bin("outlay")
        .unwrap()
        .arg(input.path())
        .arg("--compact")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status":2"#))
        .stdout(predicate::str::contains("not enough budget"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("outlay")
        .unwrap()
        .arg("/nonexistent/input.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn malformed_parameters_fail_hard() {
    let input = write_input(&FEASIBLE_INPUT.replace(r#""priority_exponent": 2.0"#, r#""priority_exponent": 0.5"#));

    Command::cargo_bin("outlay")
        .unwrap()
        .arg(input.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("priority_exponent"));
}
