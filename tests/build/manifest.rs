//! Manifest parsing tests against the fixtures.

use docsieve::build::read_manifest;
use docsieve::BuildError;

use crate::common::fixture;

#[test]
fn test_valid_manifest() {
    let manifest = read_manifest(&fixture("valid")).unwrap();
    assert_eq!(manifest.documents.len(), 6);
    assert_eq!(manifest.documents[0], "index.json");
    assert_eq!(manifest.source_suffix, ".rst");
    assert!(manifest.analyzer.stem);
    assert_eq!(manifest.env_versions.get("sphinx.domains.python"), Some(&3));
}

#[test]
fn test_invalid_manifest_json() {
    match read_manifest(&fixture("invalid-manifest")) {
        Err(BuildError::Manifest(msg)) => {
            assert!(msg.contains("Invalid manifest JSON"), "got: {}", msg)
        }
        other => panic!("expected Manifest error, got {:?}", other),
    }
}

#[test]
fn test_missing_manifest() {
    let dir = tempfile::TempDir::new().unwrap();
    match read_manifest(dir.path()) {
        Err(BuildError::Manifest(msg)) => assert!(msg.contains("manifest.json"), "got: {}", msg),
        other => panic!("expected Manifest error, got {:?}", other),
    }
}
