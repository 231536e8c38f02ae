//! Ranking rules: score descending, doc id ascending on ties.

use docsieve::build::DocumentedObject;
use docsieve::index::{build_record, BuildOptions};
use docsieve::search::query;
use docsieve::types::ObjectKind;

use crate::common::{build_test_record, ids, make_doc, make_object};

#[test]
fn test_scores_are_non_increasing() {
    let record = build_test_record(&[
        ("Grid", "grid grid grid"),
        ("Other", "a grid"),
        ("Grid Search", "search the grid"),
        ("Misc", "grid grid"),
    ]);
    let results = query(&record, "grid").unwrap();
    let scores: Vec<f64> = results.iter().map(|h| h.score).collect();
    assert_eq!(scores.len(), 4);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{:?}", scores);
}

#[test]
fn test_ties_broken_by_doc_id() {
    let record = build_test_record(&[
        ("Gamma", "kriging"),
        ("Alpha", "kriging"),
        ("Beta", "kriging"),
    ]);
    // Identical scores: order is doc id, not title.
    assert_eq!(ids(&query(&record, "kriging").unwrap()), vec![0, 1, 2]);
}

#[test]
fn test_title_beats_body() {
    let record = build_test_record(&[("Other", "about kriging"), ("Kriging", "an introduction")]);
    assert_eq!(ids(&query(&record, "kriging").unwrap()), vec![1, 0]);
}

#[test]
fn test_frequency_breaks_body_ties() {
    let record = build_test_record(&[
        ("One", "variogram"),
        ("Two", "variogram variogram variogram"),
    ]);
    assert_eq!(ids(&query(&record, "variogram").unwrap()), vec![1, 0]);
}

#[test]
fn test_exact_beats_prefix() {
    let record = build_test_record(&[("One", "gridsearch"), ("Two", "grid")]);
    assert_eq!(ids(&query(&record, "grid").unwrap()), vec![1, 0]);
}

#[test]
fn test_extra_words_filter_without_reordering() {
    let record = build_test_record(&[
        ("A", "field kriging"),
        ("B", "field kriging nugget"),
        ("C", "field kriging"),
    ]);
    assert_eq!(ids(&query(&record, "kriging nugget").unwrap()), vec![1]);
    let results = query(&record, "field kriging").unwrap();
    assert_eq!(ids(&results), vec![0, 1, 2]);
}

#[test]
fn test_module_outranks_function_for_same_word() {
    let mut api = make_doc("api", "API", "");
    api.objects.push(make_object("hydrobox.geostat", ObjectKind::Module));
    api.objects.push(DocumentedObject {
        docname: Some("funcs".to_string()),
        ..make_object("hydrobox.stats.geostat", ObjectKind::Function)
    });
    let funcs = make_doc("funcs", "Functions", "");
    let record = build_record(&[funcs, api], &BuildOptions::default()).unwrap();

    let results = query(&record, "geostat").unwrap();
    assert_eq!(ids(&results), vec![1, 0]);
    assert_eq!(results.first_object().unwrap().kind, ObjectKind::Module);
}
