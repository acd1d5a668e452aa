//! Binary tests for the offline commands and the missing-key path
//!
//! Each test runs in its own temp directory with HOME and the config dir
//! pointed inside it, and with every API key removed from the environment.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    for entry in std::fs::read_dir(fixtures_path()).expect("Failed to read fixtures") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_file() {
            let name = path.file_name().unwrap();
            std::fs::copy(&path, dir.path().join(name)).expect("Failed to copy fixture");
        }
    }
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codecritic"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("CODECRITIC_BACKEND")
        .env_remove("OPENAI_API_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run codecritic")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_metrics_json() {
    let dir = workspace();
    let output = run(dir.path(), &["metrics", "sample.js", "--format", "json", "--explain"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let metrics = &value["metrics"];
    assert_eq!(value["language"], "javascript");
    assert_eq!(metrics["linesOfCode"], 39);
    assert_eq!(metrics["functionCount"], 2);
    assert_eq!(metrics["classCount"], 1);
    assert_eq!(metrics["complexity"], 7);
    assert_eq!(metrics["overallScore"], 54);
    assert_eq!(value["breakdown"]["overall"], 54);
}

#[test]
fn test_metrics_text() {
    let dir = workspace();
    let output = run(dir.path(), &["--quiet", "metrics", "sample.js"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Code Metrics Dashboard"));
    assert!(text.contains("54/100"));
    assert!(text.contains("Poor"));
    assert!(!text.contains("Score Breakdown"));
}

#[test]
fn test_metrics_on_notebook() {
    let dir = workspace();
    let output = run(dir.path(), &["metrics", "notebook.ipynb", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["language"], "python");
    // Two code cells joined by a blank line
    assert_eq!(value["metrics"]["linesOfCode"], 6);
}

#[test]
fn test_metrics_missing_file_fails() {
    let dir = workspace();
    let output = run(dir.path(), &["metrics", "nope.js"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope.js"));
}

#[test]
fn test_example_creates_file() {
    let dir = workspace();
    let output = run(dir.path(), &["example"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let example = dir.path().join("output").join("example.js");
    let content = std::fs::read_to_string(example).unwrap();
    assert!(content.contains("class User"));
}

#[test]
fn test_review_without_key_is_fatal() {
    let dir = workspace();
    let output = run(dir.path(), &["review", "sample.js"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("OPENAI_API_KEY"));
}

#[test]
fn test_anthropic_backend_names_its_key() {
    let dir = workspace();
    let output = Command::new(env!("CARGO_BIN_EXE_codecritic"))
        .args(["report", "sample.js"])
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env_remove("ANTHROPIC_API_KEY")
        .env("CODECRITIC_BACKEND", "anthropic")
        .env("OPENAI_API_KEY", "sk-not-used")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("ANTHROPIC_API_KEY"));
}

#[test]
fn test_dotenv_supplies_key_for_doctor() {
    let dir = workspace();
    std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY=sk-from-dotenv-1234\n").unwrap();

    let output = run(dir.path(), &["doctor"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("sk-f...1234"));
    assert!(!text.contains("sk-from-dotenv-1234"));
}

#[test]
fn test_config_init_and_show() {
    let dir = workspace();
    let output = run(dir.path(), &["config", "init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = run(dir.path(), &["config", "show"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("gpt-4o"));
    assert!(text.contains("(not set)"));
}
