use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;

fn roam2md(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_roam2md"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch roam2md")
}

fn write_export(dir: &Path, export: serde_json::Value) -> String {
    let path = dir.join("export.json");
    fs::write(&path, export.to_string()).unwrap();
    path.to_string_lossy().into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn missing_input_flag_exits_one() {
    let output = roam2md(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--input"));
}

#[test]
fn unknown_flag_exits_one() {
    let output = roam2md(&["-i", "export.json", "--frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn blank_input_exits_one() {
    let output = roam2md(&["-i", ""]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn help_exits_zero() {
    let output = roam2md(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--out-dir"));
}

#[test]
fn unreadable_export_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let output = roam2md(&["-q", "-i", &missing.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("load JSON"));
}

#[test]
fn converts_an_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(
        dir.path(),
        json!([
            { "title": "January 5th, 2024", "children": [{ "uid": "daily0001", "string": "((abc123456))" }] },
            { "title": "Notes", "children": [{ "uid": "abc123456", "string": "Buy milk" }] },
        ]),
    );
    let out = dir.path().join("out");
    let output = roam2md(&["-q", "--no-color", "-i", &input, "-d", &out.to_string_lossy()]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        fs::read_to_string(out.join("daily/2024-01-05.md")).unwrap(),
        "Buy milk [[Notes#^abc123456]]"
    );
    assert_eq!(
        fs::read_to_string(out.join("Notes.md")).unwrap(),
        "Buy milk ^abc123456"
    );
}

#[test]
fn diagnostics_are_printed_when_writing_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_export(
        dir.path(),
        json!([
            { "title": "a", "children": [{ "uid": "aaaaaaaaa", "string": "see ((zzzzzzzzz))" }] },
        ]),
    );
    // A directory where the page file should go makes the write fail.
    let out = dir.path().join("out");
    fs::create_dir_all(out.join("a.md")).unwrap();

    let output = roam2md(&["-q", "--no-color", "-i", &input, "-d", &out.to_string_lossy()]);
    let stderr = stderr(&output);

    assert_eq!(output.status.code(), Some(1));
    let found = stderr.find("did not find uid 'zzzzzzzzz'").expect(&stderr);
    let failed = stderr.find("cannot write").expect(&stderr);
    assert!(found < failed);
}
