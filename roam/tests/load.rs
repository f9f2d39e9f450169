use roam::load;

const EXPORT: &str = r#"[
  {
    "title": "Notes",
    "create-time": 1700000000,
    "edit-email": "me@example.com",
    "children": [
      {
        "uid": "abc123456",
        "string": "Buy milk",
        "heading": 2,
        "text-align": "center",
        "emojis": [{"emoji": {"native": "👍"}, "users": [{"user": "me"}]}],
        "create-time": 1700000100,
        "children": [
          {"uid": "def123456", "string": "whole milk"}
        ]
      }
    ]
  },
  {"title": "Empty", "children": null}
]"#;

#[test]
fn decodes_pages_and_blocks() {
    let export = load::from_str(EXPORT).unwrap();
    assert_eq!(export.pages.len(), 2);

    let notes = &export.pages[0];
    assert_eq!(notes.title, "Notes");
    assert_eq!(notes.edit_email, "me@example.com");
    assert_eq!(notes.create_time.timestamp(), 1_700_000_000);
    assert!(!notes.is_daily);
    assert_eq!(notes.block_count(), 2);

    let block = &notes.children[0];
    assert_eq!(block.uid, "abc123456");
    assert_eq!(block.text, "Buy milk");
    assert_eq!(block.heading, 2);
    assert_eq!(block.text_align.as_deref(), Some("center"));
    assert_eq!(block.emojis.len(), 1);
    assert_eq!(block.create_time.timestamp(), 1_700_000_100);
    assert!(block.has_children());

    let child = &block.children[0];
    assert_eq!(child.heading, 0);
    assert!(child.children.is_empty());
    assert!(child.text_align.is_none());
}

#[test]
fn null_children_are_empty() {
    let export = load::from_str(EXPORT).unwrap();
    assert!(export.pages[1].children.is_empty());
}

#[test]
fn missing_timestamps_default_to_now() {
    let before = chrono::Utc::now().timestamp();
    let export = load::from_str(r#"[{"title": "T", "edit-time": 0}]"#).unwrap();
    let page = &export.pages[0];
    assert!(page.create_time.timestamp() >= before);
    assert!(page.edit_time.timestamp() >= before);
}

#[test]
fn malformed_json_is_an_error() {
    let err = load::from_str(r#"[{"title": "T", "children": [{"string": "no uid"}]}]"#)
        .unwrap_err();
    assert!(matches!(err, roam::Error::Json(_)));

    assert!(load::from_str("{not json").is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load::from_path(std::path::Path::new("/nonexistent/export.json")).unwrap_err();
    assert!(matches!(err, roam::Error::Io { .. }));
}
