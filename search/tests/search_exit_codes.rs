use std::fs;

use engine::build;
use search::{execute, SearchError, EXIT_INDEX, EXIT_QUERY};
use tempfile::tempdir;

fn saved_index(dir: &std::path::Path) -> std::path::PathBuf {
    let (index, report) = build(vec![
        (1, "Live music at the festival".to_string()),
        (2, "Music review of the week".to_string()),
    ]);
    assert_eq!(report.processed, 2);
    let path = dir.join("test.idx");
    index.save(&path).unwrap();
    path
}

#[test]
fn returns_matching_doc_ids() {
    let dir = tempdir().unwrap();
    let path = saved_index(dir.path());

    let out = execute(&path, "music AND festival").unwrap();
    assert_eq!(out.doc_ids, vec![1]);
    assert_eq!(out.total, 1);

    let out = execute(&path, "music OR review").unwrap();
    assert_eq!(out.doc_ids, vec![1, 2]);
}

#[test]
fn zero_hits_is_success_not_error() {
    let dir = tempdir().unwrap();
    let path = saved_index(dir.path());

    let out = execute(&path, "zeppelin").unwrap();
    assert_eq!(out.total, 0);
    assert!(out.doc_ids.is_empty());
}

#[test]
fn grammar_errors_map_to_exit_code_3() {
    let dir = tempdir().unwrap();
    let path = saved_index(dir.path());

    let err = execute(&path, "a b c d").unwrap_err();
    assert!(matches!(err, SearchError::Query(_)));
    assert_eq!(err.exit_code(), EXIT_QUERY);
}

#[test]
fn missing_index_maps_to_exit_code_4() {
    let dir = tempdir().unwrap();
    let err = execute(&dir.path().join("absent.idx"), "music").unwrap_err();
    assert!(matches!(err, SearchError::Index(_)));
    assert_eq!(err.exit_code(), EXIT_INDEX);
}

#[test]
fn corrupt_index_maps_to_exit_code_4() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.idx");
    fs::write(&path, b"definitely not a snapshot").unwrap();
    let err = execute(&path, "music").unwrap_err();
    assert_eq!(err.exit_code(), EXIT_INDEX);
}

#[test]
fn output_serializes_to_expected_json() {
    let dir = tempdir().unwrap();
    let path = saved_index(dir.path());

    let out = execute(&path, "NOT festival").unwrap();
    let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&out).unwrap()).unwrap();
    assert_eq!(json["query"], "NOT festival");
    assert_eq!(json["total"], 1);
    assert_eq!(json["doc_ids"][0], 2);
}
