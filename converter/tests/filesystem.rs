use std::fs;
use std::path::PathBuf;

use serde_json::json;

use converter::{Config, ConvertError, DirectoryWriter, NoProgress, PageWriter};

fn write_export(dir: &std::path::Path, export: serde_json::Value) -> PathBuf {
    let path = dir.join("export.json");
    fs::write(&path, export.to_string()).unwrap();
    path
}

#[test]
fn run_writes_markdown_tree() {
    let input_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let input = write_export(
        input_dir.path(),
        json!([
            {
                "title": "January 5th, 2024",
                "children": [{ "uid": "daily0001", "string": "((abc123456))" }]
            },
            {
                "title": "Notes",
                "children": [{ "uid": "abc123456", "string": "Buy milk" }]
            },
            {
                "title": "Projects/Garden",
                "children": [{ "uid": "garden001", "string": "plant beans" }]
            }
        ]),
    );

    let config = Config::new(input, Some(out_dir.path().to_path_buf())).unwrap();
    let summary = converter::run(&config, &mut NoProgress).unwrap();
    assert_eq!(summary.pages_written, 3);

    let read = |rel: &str| fs::read_to_string(out_dir.path().join(rel)).unwrap();
    assert_eq!(read("daily/2024-01-05.md"), "Buy milk [[Notes#^abc123456]]");
    assert_eq!(read("Notes.md"), "Buy milk ^abc123456");
    assert_eq!(read("Projects/Garden.md"), "plant beans");
}

#[test]
fn malformed_export_is_a_load_error() {
    let input_dir = tempfile::tempdir().unwrap();
    let input = input_dir.path().join("export.json");
    fs::write(&input, "[{\"title\": ").unwrap();

    let config = Config::new(input, Some(input_dir.path().join("out"))).unwrap();
    let err = converter::run(&config, &mut NoProgress).unwrap_err();
    assert!(matches!(err, ConvertError::Load(_)));
    assert!(err.to_string().starts_with("load JSON: "), "{}", err);
    assert!(!input_dir.path().join("out").exists());
}

#[test]
fn blank_input_is_rejected() {
    let err = Config::new(PathBuf::new(), None).unwrap_err();
    assert!(matches!(err, ConvertError::Config(_)));
    assert_eq!(err.to_string(), "invalid config: input is blank");
}

#[test]
fn output_directory_defaults_to_working_directory() {
    let config = Config::new(PathBuf::from("export.json"), None).unwrap();
    assert_eq!(config.out_dir, std::env::current_dir().unwrap());
}

#[test]
fn write_failure_keeps_earlier_pages() {
    let input_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    // "a.md" is written as a file first, so "a.md/b.md" cannot get its directory.
    let input = write_export(
        input_dir.path(),
        json!([
            { "title": "a", "children": [{ "uid": "aaaaaaaaa", "string": "first" }] },
            { "title": "a.md/b", "children": [{ "uid": "bbbbbbbbb", "string": "second" }] }
        ]),
    );

    let config = Config::new(input, Some(out_dir.path().to_path_buf())).unwrap();
    let err = converter::run(&config, &mut NoProgress).unwrap_err();
    assert!(matches!(err, ConvertError::CreateDir { .. }));
    assert_eq!(
        fs::read_to_string(out_dir.path().join("a.md")).unwrap(),
        "first"
    );
}

#[test]
fn directory_writer_creates_parents() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut writer = DirectoryWriter::new(out_dir.path());
    writer
        .write_page(std::path::Path::new("daily/2024-01-05.md"), "hello")
        .unwrap();
    assert_eq!(
        fs::read_to_string(writer.root().join("daily/2024-01-05.md")).unwrap(),
        "hello"
    );
}
