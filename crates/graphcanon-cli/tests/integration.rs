//! Integration tests for CLI commands.

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn write_input(contents: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.json");
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path.to_string_lossy().to_string())
}

fn run_cli(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_graphcanon"))
        .args(args)
        .output()
        .expect("Failed to execute CLI");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

fn run_cli_stdin(args: &[&str], stdin: &str) -> (bool, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_graphcanon"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    (
        output.status.success(),
        String::from_utf8(output.stdout).unwrap(),
    )
}

#[test]
fn test_json_command_sorts_keys() {
    let (_temp_dir, path) = write_input(r#"{"Yoo": 9, "Bla": 5}"#);
    let (success, stdout, _) = run_cli(&["json", &path]);
    assert!(success);
    assert_eq!(stdout, "{\"Bla\":5,\"Yoo\":9}\n");
}

#[test]
fn test_json_command_indent() {
    let (_temp_dir, path) = write_input(r#"{"z": [], "y": {}, "x": {"z": "x", "y": 1}}"#);
    let (success, stdout, _) = run_cli(&["json", &path, "--indent", "2"]);
    assert!(success);
    assert_eq!(
        stdout,
        "{\n  \"x\": {\n    \"y\": 1,\n    \"z\": \"x\"\n  },\n  \"y\": {},\n  \"z\": []\n}\n"
    );
}

#[test]
fn test_json_command_reads_stdin() {
    let (success, stdout) = run_cli_stdin(&["json"], r#"[5.0, {"b": 1, "a": 2}]"#);
    assert!(success);
    assert_eq!(stdout, "[5,{\"a\":2,\"b\":1}]\n");
}

#[test]
fn test_json_command_indent_nested_arrays() {
    let (success, stdout) = run_cli_stdin(&["json", "--indent", "2"], "[[1],[2]]");
    assert!(success);
    assert_eq!(stdout, "[[\n    1\n  ],[\n    2\n  ]]\n");
}

#[test]
fn test_json_command_normalizes_timestamps() {
    let (_temp_dir, path) = write_input(r#"{"at": "1970-01-01T02:00:00.4449+02:00"}"#);
    let (success, stdout, _) = run_cli(&["json", &path, "--timestamps"]);
    assert!(success);
    assert_eq!(stdout, "{\"at\":\"1970-01-01T00:00:00.444Z\"}\n");
}

#[test]
fn test_digest_command() {
    let (_temp_dir, path) =
        write_input(r#"{"kind": "test", "data": {"name": "object", "date": "2021-05-20"}}"#);
    let (success, stdout, _) = run_cli(&["digest", &path]);
    assert!(success);
    assert_eq!(stdout.trim(), "5zWhdtvKuGob1FbW9vUGPQKobcLtYYr5wU8AxQRVraeB");
}

#[test]
fn test_digest_ignores_key_order() {
    let (_a, first) = write_input(r#"{"a": 1, "b": [1, 2]}"#);
    let (_b, second) = write_input(r#"{"b": [1, 2], "a": 1}"#);
    let (_, digest_a, _) = run_cli(&["digest", &first]);
    let (_, digest_b, _) = run_cli(&["digest", &second]);
    assert_eq!(digest_a, digest_b);
}

#[test]
fn test_pair_command_outputs_json_hash() {
    let (_temp_dir, path) = write_input(r#"{"y": 1, "x": 2}"#);
    let (success, stdout, _) = run_cli(&["pair", &path]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["json"], "{\"x\":2,\"y\":1}");

    let (_, digest, _) = run_cli(&["digest", &path]);
    assert_eq!(parsed["hash"], digest.trim());
}

#[test]
fn test_events_command() {
    let (_temp_dir, path) = write_input(r#"{"x": [true]}"#);
    let (success, stdout, _) = run_cli(&["events", &path]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "{    \t{",
            "Attr \t{.x\tx",
            "[    \t{.x.[",
            "Value\t{.x.[.0\ttrue",
            "]    \t{.x.]",
            "}    \t}",
        ]
    );
}

#[test]
fn test_max_depth_rejects_deep_input() {
    let (_temp_dir, path) = write_input("[[[1]]]");
    let (success, _, stderr) = run_cli(&["json", &path, "--max-depth", "2"]);
    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("exceeds limit 2"));
}

#[test]
fn test_invalid_json_fails() {
    let (_temp_dir, path) = write_input("{not json");
    let (success, _, stderr) = run_cli(&["digest", &path]);
    assert!(!success);
    assert!(stderr.contains("Invalid JSON"));
}

#[test]
fn test_missing_file_fails() {
    let (success, _, stderr) = run_cli(&["json", "/nonexistent/input.json"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read file"));
}
