//! CLI behavior tests: exit codes, offline baseline output, init.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

const CREDENTIAL_VARS: [&str; 4] = [
    "AZURE_OPENAI_API_KEY",
    "AZURE_OPENAI_API_VERSION",
    "AZURE_OPENAI_ENDPOINT",
    "AZURE_OPENAI_DEPLOYMENT_NAME",
];

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn insights_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_insights"));
    cmd.env_remove("INSIGHTS_LOG");
    cmd
}

fn baseline_json(args: &[&str]) -> serde_json::Value {
    let output = insights_cmd()
        .arg("baseline")
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn no_args_returns_error_not_panic() {
    insights_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PATH"));
}

#[test]
fn baseline_json_scenario() {
    let parsed = baseline_json(&[fixture("feedback.json").to_str().unwrap(), "-n", "2"]);
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);

    assert_eq!(arr[0]["id"], 1);
    assert_eq!(arr[0]["text"], "Great product!");
    assert_eq!(arr[0]["baseline"]["sentiment"], "Positive");
    assert_eq!(arr[0]["baseline"]["themes"].as_array().unwrap().len(), 0);

    assert_eq!(arr[1]["baseline"]["sentiment"], "Negative");
    assert_eq!(arr[1]["baseline"]["themes"][0], "Authentication");
    assert_eq!(arr[1]["baseline"]["themes"][1], "Stability");
    assert_eq!(arr[1]["baseline"]["recommendations"][0], "Manual review suggested");
    assert_eq!(arr[1]["baseline"]["meta"]["cost_usd"], 0.0);
}

#[test]
fn baseline_csv_skips_empty_rows_and_truncates() {
    let parsed = baseline_json(&[fixture("feedback.csv").to_str().unwrap(), "--max-rows", "20"]);
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 4);
    assert_eq!(arr[3]["text"], "Checkout was slow and confusing");

    let parsed = baseline_json(&[fixture("feedback.csv").to_str().unwrap(), "-n", "2"]);
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn baseline_default_max_rows_is_five() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("many.txt");
    let content: String = (1..=8).map(|i| format!("item {}\n", i)).collect();
    fs::write(&path, content).unwrap();

    let parsed = baseline_json(&[path.to_str().unwrap()]);
    assert_eq!(parsed.as_array().unwrap().len(), 5);
}

#[test]
fn format_override_reads_txt_as_lines() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("feedback.data");
    fs::write(&path, "good one\n\nslow one\n").unwrap();

    let parsed = baseline_json(&[path.to_str().unwrap(), "--format", "txt"]);
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[1]["baseline"]["sentiment"], "Negative");
}

#[test]
fn non_list_json_is_empty_not_error() {
    insights_cmd()
        .arg("baseline")
        .arg(fixture("not_a_list.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("No feedback records"));
}

#[test]
fn max_rows_out_of_range_is_usage_error() {
    insights_cmd()
        .arg("baseline")
        .arg(fixture("feedback.txt"))
        .arg("--max-rows")
        .arg("21")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn unsupported_extension_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("feedback.xlsx");
    fs::write(&path, "whatever").unwrap();

    insights_cmd()
        .arg("baseline")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unsupported input format"));
}

#[test]
fn malformed_json_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[\"unterminated").unwrap();

    insights_cmd()
        .arg("baseline")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Malformed JSON input"));
}

#[test]
fn file_not_found_exit_2() {
    insights_cmd()
        .arg("baseline")
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to read").and(predicate::str::contains("nonexistent")));
}

#[test]
fn full_run_without_credentials_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = insights_cmd();
    cmd.current_dir(dir.path()).arg(fixture("feedback.txt"));
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("AZURE_OPENAI_API_KEY"));
    // nothing exported on failure
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".insightsrc.json");
    insights_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();
    assert!(config_path.exists(), ".insightsrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(parsed.get("maxRows").is_none());
    assert_eq!(parsed["pricing"]["inputPer1k"], 0.005);
}

#[test]
fn init_existing_config_left_alone() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".insightsrc.json");
    fs::write(&config_path, "{}").unwrap();
    insights_cmd()
        .arg("init")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&config_path).unwrap(), "{}");
}

#[test]
fn max_rows_in_config_file_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join(".insightsrc.json"), r#"{ "maxRows": 2 }"#).unwrap();
    let path = dir.path().join("feedback.txt");
    fs::write(&path, "a\nb\nc\nd\n").unwrap();

    insights_cmd()
        .arg("baseline")
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("maxRows"));
}

#[test]
fn config_output_dir_applies_without_flag() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join(".insightsrc.json"), r#"{ "outputDir": "out" }"#).unwrap();
    let path = dir.path().join("feedback.txt");
    fs::write(&path, "a\nb\nc\nd\n").unwrap();

    let parsed = baseline_json(&[path.to_str().unwrap()]);
    assert_eq!(parsed.as_array().unwrap().len(), 4);
}

#[test]
fn baseline_console_shows_fields_by_default() {
    insights_cmd()
        .arg("baseline")
        .arg(fixture("feedback.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Authentication, Stability"))
        .stdout(predicate::str::contains("Manual review suggested"))
        .stdout(predicate::str::contains("\"method\"").not());
}

#[test]
fn baseline_console_verbose_shows_pretty_json() {
    insights_cmd()
        .arg("baseline")
        .arg(fixture("feedback.json"))
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"method\": \"Baseline\""))
        .stdout(predicate::str::contains("\"cost_usd\": 0.0"));
}

#[test]
fn no_color_strips_escape_codes() {
    insights_cmd()
        .env("CLICOLOR_FORCE", "1")
        .arg("baseline")
        .arg(fixture("feedback.json"))
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("Negative"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}
