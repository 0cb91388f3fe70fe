//! Integration tests for the public domain surface.
//!
//! Orchestrator behavior is covered by the unit tests beside each service
//! and by the end-to-end suite in `modelver-store`.

use std::cmp::Ordering;

use modelver_core::{
    ArtifactKind, ArtifactRecord, CoreError, ErrorKind, RegistrationRequest, VersionRegistry,
    compare_tags,
};

const ENTRY: &str = r#"{
    "model": "modelA",
    "version": "v1.0.0",
    "path": "data/x.csv",
    "pointer_ref": { "file": "data/x.csv.dvc", "digest": "3863d0e317dee0a55c4e59d2ec0eef33" },
    "description": "initial",
    "revision_id": "9f1c2ab",
    "created_at": "2024-03-01T12:00:00Z",
    "owner": "data-team"
}"#;

#[test]
fn test_record_keeps_unknown_fields() {
    let record: ArtifactRecord = serde_json::from_str(ENTRY).unwrap();
    assert_eq!(record.kind, ArtifactKind::Data);
    assert_eq!(record.extra.get("owner").and_then(|v| v.as_str()), Some("data-team"));

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["owner"], "data-team");
    assert_eq!(value["kind"], "data");
    assert_eq!(value["pointer_ref"]["file"], "data/x.csv.dvc");
}

#[test]
fn test_registry_rejects_duplicates_from_records() {
    let record: ArtifactRecord = serde_json::from_str(ENTRY).unwrap();
    let err = VersionRegistry::from_records([record.clone(), record]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateVersion);
}

#[test]
fn test_version_ordering_only_for_tags() {
    assert_eq!(compare_tags("v1.10.0", "v1.9.3"), Some(Ordering::Greater));
    assert_eq!(compare_tags("v1.0.0", "release"), None);
}

#[test]
fn test_error_kind_names() {
    let err = CoreError::InvalidInput("model must not be empty".to_string());
    assert_eq!(err.kind().to_string(), "InvalidInputError");
}

#[test]
fn test_request_commit_message() {
    let request = RegistrationRequest::new("clf", "v2.0.0", "models/clf", "retrained")
        .with_kind(ArtifactKind::Model);
    assert_eq!(request.commit_message(), "[clf] v2.0.0: retrained");
}
