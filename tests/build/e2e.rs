//! End-to-end tests for the build workflow.

use std::fs;

use docsieve::build::run_build;
use docsieve::format::{load, RecordFormat, JS_PREFIX};
use docsieve::index::builtin_env_versions;
use docsieve::search::query;
use docsieve::types::{DocId, ObjectKind};
use docsieve::BuildError;
use tempfile::TempDir;

use crate::common::{assert_record_well_formed, build_valid_fixture, doc_id, fixture};

#[test]
fn test_run_build_e2e_js() {
    let (_out, path) = build_valid_fixture(RecordFormat::Js);

    assert!(path.ends_with("searchindex.js"));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(JS_PREFIX), "should be wrapped: {}", &text[..40]);

    let record = load(&path).unwrap();
    assert_eq!(record.doc_count(), 6);
    assert_record_well_formed(&record);
}

#[test]
fn test_run_build_e2e_json() {
    let (_out, path) = build_valid_fixture(RecordFormat::Json);

    assert!(path.ends_with("searchindex.json"));
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\"format\":1,"));
    assert_eq!(load(&path).unwrap().doc_count(), 6);
}

#[test]
fn test_build_summary_matches_record() {
    let out = TempDir::new().unwrap();
    let summary = run_build(&fixture("valid"), out.path(), RecordFormat::Json).unwrap();
    let path = summary.output.clone();
    let record = load(&path).unwrap();

    assert_eq!(summary.doc_count, record.doc_count());
    assert_eq!(summary.term_count, record.term_count());
    assert_eq!(summary.object_count, 3);
    assert_eq!(summary.bytes as u64, fs::metadata(&path).unwrap().len());
}

#[test]
fn test_fixture_tables() {
    let (_out, path) = build_valid_fixture(RecordFormat::Js);
    let record = load(&path).unwrap();

    assert_eq!(record.docnames[0], "index");
    assert_eq!(record.filenames[1], "toolboxes.rst");
    assert_eq!(record.titles[2], "Estimate a Variogram");

    let toolboxes = doc_id(&record, "toolboxes");
    let stub = doc_id(&record, "gen_modules/hydrobox.geostat.variogram");

    let module = &record.objects["hydrobox.geostat"];
    assert_eq!(module.kind(), ObjectKind::Module);
    assert_eq!(module.doc(), DocId(toolboxes));
    assert_eq!(module.anchor("hydrobox.geostat"), "module-hydrobox.geostat");

    let func = &record.objects["hydrobox.geostat.variogram"];
    assert_eq!(func.kind(), ObjectKind::Function);
    assert_eq!(func.doc(), DocId(stub));
}

#[test]
fn test_fixture_env_versions() {
    let (_out, path) = build_valid_fixture(RecordFormat::Json);
    let record = load(&path).unwrap();

    assert_eq!(record.envversion["sphinx.domains.python"], 3);
    assert_eq!(record.envversion["sphinx.domains.std"], 2);
    assert!(record.check_env(&builtin_env_versions()).is_ok());
}

#[test]
fn test_fixture_queries() {
    let (_out, path) = build_valid_fixture(RecordFormat::Js);
    let record = load(&path).unwrap();

    let results = query(&record, "variogram").unwrap();
    let files: Vec<&str> = results.iter().map(|h| h.filename).collect();
    assert!(files.contains(&"auto_examples/geostat/plot_variogram.rst"));
    assert!(files.contains(&"gen_modules/hydrobox.geostat.variogram.rst"));
    assert!(!files.contains(&"index.rst"));

    assert!(query(&record, "zzz").unwrap().is_empty());
}

#[test]
fn test_fixture_object_query() {
    let (_out, path) = build_valid_fixture(RecordFormat::Js);
    let record = load(&path).unwrap();

    let results = query(&record, "ordinary_kriging").unwrap();
    let best = results.iter().next().unwrap();
    assert_eq!(best.filename, "gen_modules/hydrobox.geostat.ordinary_kriging.rst");

    let object = results.first_object().unwrap();
    assert_eq!(object.name, "hydrobox.geostat.ordinary_kriging");
    assert_eq!(object.kind, ObjectKind::Function);
    assert_eq!(object.anchor, "hydrobox.geostat.ordinary_kriging");
}

#[test]
fn test_run_build_e2e_missing_manifest() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let err = run_build(input.path(), out.path(), RecordFormat::Js).unwrap_err();
    assert!(matches!(err, BuildError::Manifest(_)), "got {:?}", err);
}

#[test]
fn test_run_build_e2e_invalid_manifest() {
    let out = TempDir::new().unwrap();
    let err = run_build(&fixture("invalid-manifest"), out.path(), RecordFormat::Js).unwrap_err();
    assert!(err.to_string().contains("Invalid manifest JSON"), "got: {}", err);
}

#[test]
fn test_run_build_e2e_dangling_object_writes_nothing() {
    let out = TempDir::new().unwrap();
    let output_path = out.path().join("output");

    let err = run_build(&fixture("dangling"), &output_path, RecordFormat::Js).unwrap_err();
    match err {
        BuildError::DanglingObject { object, owner, target } => {
            assert_eq!(object, "hydrobox.geostat.universal_kriging");
            assert_eq!(owner, "toolboxes");
            assert_eq!(target, "gen_modules/hydrobox.geostat.universal_kriging");
        }
        other => panic!("expected DanglingObject, got {:?}", other),
    }
    assert!(!output_path.join("searchindex.js").exists());
    assert!(!output_path.join("searchindex.json").exists());
}

#[test]
fn test_failed_build_keeps_previous_record() {
    let out = TempDir::new().unwrap();
    run_build(&fixture("valid"), out.path(), RecordFormat::Js).unwrap();
    let before = fs::read(out.path().join("searchindex.js")).unwrap();

    assert!(run_build(&fixture("dangling"), out.path(), RecordFormat::Js).is_err());

    let after = fs::read(out.path().join("searchindex.js")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_missing_document_file() {
    let input = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::write(
        input.path().join("manifest.json"),
        r#"{"version": 1, "documents": ["gone.json"]}"#,
    )
    .unwrap();

    let err = run_build(input.path(), out.path(), RecordFormat::Json).unwrap_err();
    assert!(matches!(err, BuildError::Read { .. }), "got {:?}", err);
}

#[test]
fn test_emptied_manifest_clears_previous_record() {
    let out = TempDir::new().unwrap();
    run_build(&fixture("valid"), out.path(), RecordFormat::Js).unwrap();
    assert!(!query(&load(out.path().join("searchindex.js")).unwrap(), "variogram")
        .unwrap()
        .is_empty());

    let input = TempDir::new().unwrap();
    fs::write(
        input.path().join("manifest.json"),
        r#"{"version": 1, "documents": []}"#,
    )
    .unwrap();
    let summary = run_build(input.path(), out.path(), RecordFormat::Js).unwrap();
    assert_eq!(summary.doc_count, 0);

    let record = load(&summary.output).unwrap();
    assert_record_well_formed(&record);
    assert_eq!(record.doc_count(), 0);
    assert!(query(&record, "variogram").unwrap().is_empty());
}
