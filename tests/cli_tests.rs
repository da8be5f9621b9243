//! End-to-end tests of the `pair-solver` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn pair_solver() -> Command {
    Command::cargo_bin("pair-solver").unwrap()
}

fn instance_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    write!(file, "{content}").unwrap();
    file.flush().unwrap();
    file
}

const FOUR_VERTEX: &str = "4\n0 1 4 3\n1 0 2 5\n4 2 0 6\n3 5 6 0\n";

#[test]
fn test_solve_text_output() {
    let file = instance_file(".tsv", FOUR_VERTEX);
    pair_solver()
        .arg("solve")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total cost: 5"))
        .stdout(predicate::str::contains("Solver: bitmask"));
}

#[test]
fn test_solve_json_output() {
    let file = instance_file(".tsv", FOUR_VERTEX);
    let output = pair_solver()
        .args(["solve", "--format", "json", "--solver", "brute-force"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["cost"], 5);
    assert_eq!(json["solver"], "brute-force");
    assert_eq!(json["matching"], serde_json::json!([[0, 3], [1, 2]]));
}

#[test]
fn test_solve_points_tsv_output() {
    let file = instance_file(".csv", "x,y\n0,0\n10,0\n1,0\n11,0\n");
    pair_solver()
        .args(["solve", "--points", "--format", "tsv"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("vertex_a\tvertex_b\tcost"))
        .stdout(predicate::str::contains("0\t1\t1.000000"));
}

#[test]
fn test_solve_crossing_points_is_exact() {
    let file = instance_file(".tsv", "0 0\n1 10\n2 0\n3 10\n");
    pair_solver()
        .args(["solve", "--points"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Solver: bitmask"))
        .stdout(predicate::str::contains("Total cost: 4.000000"))
        .stdout(predicate::str::contains("Upper bound").not());
}

#[test]
fn test_solve_odd_instance_fails() {
    let file = instance_file(".json", r#"{"costs": [[0, 1, 1], [1, 0, 1], [1, 1, 0]]}"#);
    pair_solver()
        .arg("solve")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("even number of vertices"));
}

#[test]
fn test_solve_missing_file_fails() {
    pair_solver()
        .args(["solve", "/nonexistent/instance.tsv"])
        .assert()
        .failure();
}

#[test]
fn test_compare_agrees() {
    let file = instance_file(".tsv", FOUR_VERTEX);
    pair_solver()
        .arg("compare")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All successful solvers agree."));
}

#[test]
fn test_generate_then_compare() {
    let output = NamedTempFile::with_suffix(".tsv").unwrap();
    pair_solver()
        .args(["generate", "matrix", "--size", "8", "--seed", "42", "--output"])
        .arg(output.path())
        .assert()
        .success();

    pair_solver()
        .args(["compare", "--format", "json"])
        .arg(output.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"agree\": true"));
}

#[test]
fn test_generate_is_reproducible() {
    let run = || {
        pair_solver()
            .args(["generate", "points", "-n", "6", "--seed", "7"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert!(String::from_utf8_lossy(&first).starts_with("x\ty\n"));
    assert_eq!(first, run());
}

#[test]
fn test_config_lowers_limits() {
    let file = instance_file(".tsv", FOUR_VERTEX);
    let config = instance_file(".json", r#"{"bitmask_limit": 2}"#);
    pair_solver()
        .arg("--config")
        .arg(config.path())
        .args(["solve", "--solver", "bitmask"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 2 vertices"));
}

#[test]
fn test_verify_embedded_catalog() {
    pair_solver()
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("checks passed"));
}

#[test]
fn test_verify_reports_wrong_expectation() {
    let catalog = instance_file(
        ".json",
        r#"{"version": "1.0.0", "instances": [
            {"id": "pair", "costs": [[0, 7], [7, 0]], "expected_cost": 3}
        ]}"#,
    );
    pair_solver()
        .args(["verify", "--catalog"])
        .arg(catalog.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"));
}
