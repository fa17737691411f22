//! Integration tests for the turnpair binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_log(dir: &TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn sample_log(dir: &TempDir) -> std::path::PathBuf {
    write_log(
        dir,
        "messages.jsonl",
        &[
            r#"{"conversation_id":"c1","is_local_author":false,"text":"hi","timestamp":1}"#,
            r#"{"conversation_id":"c1","is_local_author":false,"text":"you there","timestamp":2}"#,
            r#"{"conversation_id":"c1","is_local_author":true,"text":"yes","timestamp":3}"#,
            r#"{"conversation_id":"c1","is_local_author":true,"text":"what's up","timestamp":4}"#,
            r#"{"conversation_id":"c2","is_local_author":true,"text":"opener","timestamp":5}"#,
        ],
    )
}

#[test]
fn extract_writes_labeled_examples() {
    let dir = TempDir::new().unwrap();
    let input = sample_log(&dir);
    let output = dir.path().join("out.json");

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 examples"));

    let examples: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        examples[0]["text"],
        "person: hi you there\nme: yes what's up"
    );
    assert_eq!(examples[0]["label"], 0);
    assert_eq!(examples[1]["text"], "person: \nme: opener");
}

#[test]
fn skip_unpaired_filters_conversation_openers() {
    let dir = TempDir::new().unwrap();
    let input = sample_log(&dir);
    let output = dir.path().join("out.json");

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--skip-unpaired")
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 examples"));

    let examples: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(examples.as_array().unwrap().len(), 1);
}

#[test]
fn conversation_filter_restricts_to_one_thread() {
    let dir = TempDir::new().unwrap();
    let input = sample_log(&dir);
    let output = dir.path().join("out.json");

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--conversation")
        .arg("c2")
        .arg("--output")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();

    let examples: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(examples.as_array().unwrap().len(), 1);
    assert_eq!(examples[0]["text"], "person: \nme: opener");
}

#[test]
fn response_role_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let input = sample_log(&dir);
    let output = dir.path().join("out.json");

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--response-role")
        .arg("MeGPT")
        .arg("--output")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();

    let examples: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        examples[0]["text"],
        "person: hi you there\nMeGPT: yes what's up"
    );
}

#[test]
fn context_role_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let input = sample_log(&dir);
    let output = dir.path().join("out.json");

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--context-role")
        .arg("them")
        .arg("--output")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();

    let examples: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        examples[0]["text"],
        "them: hi you there\nme: yes what's up"
    );
}

#[test]
fn config_file_roles_and_compact_output_take_effect() {
    let dir = TempDir::new().unwrap();
    let input = sample_log(&dir);
    let output = dir.path().join("out.json");

    // Point the config directory at a private location for this run
    let config_home = dir.path().join("config");
    fs::create_dir_all(config_home.join("turnpair")).unwrap();
    fs::write(
        config_home.join("turnpair").join("config.toml"),
        "[roles]\ncontext = \"other\"\nresponse = \"MeGPT\"\n\n[output]\npretty = false\n",
    )
    .unwrap();

    Command::cargo_bin("turnpair")
        .unwrap()
        .env("XDG_CONFIG_HOME", &config_home)
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();

    let content = fs::read_to_string(&output).unwrap();
    // Compact serialization: no pretty-printed indentation
    assert!(content.starts_with("[{\"text\""));

    let examples: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        examples[0]["text"],
        "other: hi you there\nMeGPT: yes what's up"
    );
}

#[test]
fn empty_result_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_log(
        &dir,
        "empty.jsonl",
        &[r#"{"conversation_id":"c1","is_local_author":false,"text":"hi","timestamp":1}"#],
    );
    let output = dir.path().join("out.json");

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("No examples found"));

    assert!(!output.exists());
}

#[test]
fn refuses_to_overwrite_without_force_when_non_interactive() {
    let dir = TempDir::new().unwrap();
    let input = sample_log(&dir);
    let output = dir.path().join("out.json");
    fs::write(&output, "existing").unwrap();

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made."));

    assert_eq!(fs::read_to_string(&output).unwrap(), "existing");
}

#[test]
fn missing_input_fails_with_context() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(dir.path().join("nope.jsonl"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open message log"));
}

#[test]
fn invalid_record_reports_line_number() {
    let dir = TempDir::new().unwrap();
    let input = write_log(
        &dir,
        "bad.jsonl",
        &[
            r#"{"conversation_id":"c1","is_local_author":false,"text":"hi","timestamp":1}"#,
            "not json",
        ],
    );

    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn completions_subcommand_generates_script() {
    Command::cargo_bin("turnpair")
        .unwrap()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("turnpair"));
}
