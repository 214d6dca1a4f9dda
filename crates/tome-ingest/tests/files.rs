//! Filesystem tests for legacy loading and artifact I/O.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use tome_ingest::{
    IngestError, NormalizedArtifact, load_artifact, load_legacy, read_artifact, write_artifact,
};
use tome_model::Domain;

#[test]
fn legacy_script_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("monsters-SRD.js");
    fs::write(
        &path,
        "// generated\nvar monsters = [\n  {\"name\": \"Wolf\", \"hp\": 11}\n];\n",
    )
    .unwrap();

    let dataset = load_legacy(&path).unwrap();
    assert_eq!(dataset.global.as_deref(), Some("monsters"));
    assert_eq!(dataset.records, json!([{"name": "Wolf", "hp": 11}]));
}

#[test]
fn legacy_json_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spells-custom.json");
    fs::write(&path, r#"[{"name": "Light"}, {"name": "Shield"}]"#).unwrap();

    let dataset = load_legacy(&path).unwrap();
    assert!(dataset.global.is_none());
    assert_eq!(dataset.len(), 2);
}

#[test]
fn legacy_json_object_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spells.json");
    fs::write(&path, r#"{"name": "Light"}"#).unwrap();

    let err = load_legacy(&path).unwrap_err();
    assert!(matches!(err, IngestError::NotAnArray { found: "object", .. }));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = load_legacy(&dir.path().join("absent.js")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn artifact_write_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("spells.normalized.json");
    let artifact = NormalizedArtifact::new(
        Domain::Spells,
        Some("spells-SRD.js".to_string()),
        vec![json!({"id": "sp-1", "name": "Light"})],
    );

    write_artifact(&path, &artifact).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let records = load_artifact(&path, Domain::Spells).unwrap();
    assert_eq!(records, vec![json!({"id": "sp-1", "name": "Light"})]);
    assert_eq!(read_artifact(&path, Domain::Spells).unwrap(), artifact);
}

#[test]
fn artifact_for_other_domain_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("monsters.normalized.json");
    write_artifact(
        &path,
        &NormalizedArtifact::new(Domain::Spells, None, Vec::new()),
    )
    .unwrap();

    let err = load_artifact(&path, Domain::Monsters).unwrap_err();
    assert!(matches!(
        err,
        IngestError::DomainMismatch { ref found, .. } if found == "spells"
    ));
}

#[test]
fn unflagged_artifact_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spells.normalized.json");
    fs::write(
        &path,
        r#"{"__domain": "spells", "records": [{"id": "sp-1"}]}"#,
    )
    .unwrap();

    let err = load_artifact(&path, Domain::Spells).unwrap_err();
    assert!(matches!(err, IngestError::NotNormalized { .. }));
}

#[test]
fn artifact_with_non_array_records_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spells.normalized.json");
    fs::write(
        &path,
        r#"{"__normalized": true, "__domain": "spells", "records": {"id": "sp-1"}}"#,
    )
    .unwrap();

    let err = load_artifact(&path, Domain::Spells).unwrap_err();
    assert!(matches!(err, IngestError::NotAnArray { .. }));
}

#[test]
fn overwrite_replaces_previous_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("magic-items.normalized.json");
    write_artifact(
        &path,
        &NormalizedArtifact::new(Domain::MagicItems, None, vec![json!({"id": "a"})]),
    )
    .unwrap();
    write_artifact(
        &path,
        &NormalizedArtifact::new(Domain::MagicItems, None, vec![json!({"id": "b"})]),
    )
    .unwrap();

    let records = load_artifact(&path, Domain::MagicItems).unwrap();
    assert_eq!(records, vec![json!({"id": "b"})]);
}

#[test]
fn failed_rename_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spells.json");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("occupant"), "x").unwrap();

    let artifact = NormalizedArtifact::new(Domain::Spells, None, vec![json!({"id": "sp-1"})]);
    let err = write_artifact(&path, &artifact).unwrap_err();
    assert!(matches!(err, IngestError::AtomicWriteFailed { .. }));
    assert!(!path.with_extension("json.tmp").exists());
    assert!(path.join("occupant").exists());
}
