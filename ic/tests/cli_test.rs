//! End-to-end tests for the `ic` binary

use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/health_interview.json");

fn ic() -> Command {
    let mut cmd = Command::cargo_bin("ic").expect("ic binary should build");
    cmd.env("RUST_LOG", "error").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_classify_fixture_as_json() {
    let output = ic().args(["classify", FIXTURE]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["lifeAreas"], serde_json::json!(["health_self_care"]));
    assert_eq!(value["yearlyGoals"].as_array().unwrap().len(), 2);
    assert_eq!(value["yearlyGoals"][0]["title"], "Run a marathon");
    assert_eq!(value["yearlyGoals"][1]["lifeArea"], "health_self_care");
    assert!(value["habits"].as_array().unwrap().is_empty());
    assert!(value["projects"].as_array().unwrap().is_empty());
}

#[test]
fn test_classify_from_stdin_as_text() {
    ic().args(["classify", "-", "--format", "text"])
        .write_stdin(r#"[{"role":"user","content":"Meditate, stretch","question_type":"habits"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Uncategorized"))
        .stdout(predicate::str::contains("Habits (2)"))
        .stdout(predicate::str::contains("Meditate"));
}

#[test]
fn test_classify_rejects_invalid_json() {
    ic().args(["classify", "-"]).write_stdin("[{").assert().failure();
}

#[test]
fn test_detect_prints_question_type() {
    ic().args(["detect", "What are your big goals this year?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("yearly_goals"));

    ic().args(["detect", "Nice to meet you"])
        .assert()
        .success()
        .stdout(predicate::str::contains("general"));
}

#[test]
fn test_split_prints_items() {
    ic().args(["split", "Run a marathon, read 12 books, ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run a marathon"))
        .stdout(predicate::str::contains("read 12 books"))
        .stdout(predicate::str::contains("✓ ok").not());
}
