//! Search correctness through the full write → load → query path.

use std::fs;

use docsieve::format::{encode, load, RecordFormat};
use docsieve::search::{query, MAX_QUERY_LEN, MIN_PREFIX_LEN};
use docsieve::{IndexRecord, QueryError};
use tempfile::TempDir;

use crate::common::{build_test_record, ids, variogram_corpus};

/// Write, then load again, so tests exercise what a widget actually sees.
fn round_trip(record: &IndexRecord) -> IndexRecord {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("searchindex.js");
    fs::write(&path, encode(record, RecordFormat::Js).unwrap()).unwrap();
    load(&path).unwrap()
}

#[test]
fn test_worked_example() {
    let record = round_trip(&variogram_corpus());

    let estimate = ids(&query(&record, "estimate").unwrap());
    let mut sorted = estimate.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1]);

    assert_eq!(ids(&query(&record, "variogram").unwrap()), vec![0]);
    assert_eq!(ids(&query(&record, "zzz").unwrap()), Vec::<u32>::new());
}

#[test]
fn test_title_match_ranks_first_in_worked_example() {
    let record = round_trip(&variogram_corpus());
    // doc0 has "estimate" in its title, doc1 only in its body.
    assert_eq!(ids(&query(&record, "estimate").unwrap()), vec![0, 1]);
}

#[test]
fn test_inflections_match_the_same_stem() {
    let record = round_trip(&variogram_corpus());
    assert_eq!(ids(&query(&record, "estimates").unwrap()), vec![0, 1]);
    assert_eq!(ids(&query(&record, "Estimating").unwrap()), vec![0, 1]);
    assert_eq!(ids(&query(&record, "VARIOGRAMS").unwrap()), vec![0]);
}

#[test]
fn test_unknown_term_is_empty_not_error() {
    let record = variogram_corpus();
    let results = query(&record, "semivariance").unwrap();
    assert!(results.is_empty());
    assert_eq!(results.iter().count(), 0);
}

#[test]
fn test_results_resolve_titles_and_filenames() {
    let record = round_trip(&variogram_corpus());
    let results = query(&record, "toolbox").unwrap();
    let rows: Vec<(&str, &str)> = results.iter().map(|h| (h.title, h.filename)).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.contains(&("Estimate a Variogram", "doc0.rst")));
    assert!(rows.contains(&("Hydrobox Examples", "doc1.rst")));
}

#[test]
fn test_sequence_is_restartable() {
    let record = variogram_corpus();
    let results = query(&record, "toolbox").unwrap();
    let first: Vec<_> = results.iter().collect();
    let second: Vec<_> = results.iter().collect();
    assert_eq!(first, second);
}

#[test]
fn test_all_words_required() {
    let record = variogram_corpus();
    assert_eq!(ids(&query(&record, "variogram toolbox").unwrap()), vec![0]);
    assert_eq!(ids(&query(&record, "gallery toolbox").unwrap()), vec![1]);
    assert!(query(&record, "gallery variogram").unwrap().is_empty());
}

#[test]
fn test_excluded_words() {
    let record = variogram_corpus();
    assert_eq!(ids(&query(&record, "toolbox -gallery").unwrap()), vec![0]);
    assert!(query(&record, "variogram -estimate").unwrap().is_empty());
    // Excluding an unknown word excludes nothing.
    assert_eq!(ids(&query(&record, "variogram -zzz").unwrap()), vec![0]);
}

#[test]
fn test_prefix_words() {
    let record = variogram_corpus();
    assert_eq!(ids(&query(&record, "gall").unwrap()), vec![1]);
    assert_eq!(ids(&query(&record, "vario").unwrap()), vec![0]);
}

#[test]
fn test_partly_typed_words_keep_matching() {
    let record = round_trip(&build_test_record(&[("Methods", "estimate kriging interpolation")]));
    for word in ["estimate", "kriging", "interpolation"] {
        for end in MIN_PREFIX_LEN..=word.len() {
            let typed = &word[..end];
            assert_eq!(ids(&query(&record, typed).unwrap()), vec![0], "typed {:?}", typed);
        }
    }
}

#[test]
fn test_partly_typed_word_does_not_leak() {
    let record = variogram_corpus();
    // "interpolate" only appears on doc1.
    for typed in ["inter", "interpo", "interpola", "interpolat"] {
        assert_eq!(ids(&query(&record, typed).unwrap()), vec![1], "typed {:?}", typed);
    }
}

#[test]
fn test_term_only_in_one_document() {
    let record = build_test_record(&[
        ("Kriging", "ordinary kriging on a grid"),
        ("Sampling", "random sampling of a field"),
        ("Regression", "linear regression"),
    ]);
    for (word, doc) in [("kriging", 0), ("sampling", 1), ("linear", 2)] {
        assert_eq!(ids(&query(&record, word).unwrap()), vec![doc], "query {}", word);
    }
}

#[test]
fn test_query_too_long_is_recoverable() {
    let record = variogram_corpus();
    let text = "variogram ".repeat(MAX_QUERY_LEN / 10 + 1);
    let err = query(&record, &text).unwrap_err();
    assert!(matches!(err, QueryError::TooLong { max: MAX_QUERY_LEN, .. }));
    assert!(err.hint().contains("512"));

    // The record is untouched; the next query works.
    assert_eq!(ids(&query(&record, "variogram").unwrap()), vec![0]);
}

#[test]
fn test_multiple_records_coexist() {
    let v1 = build_test_record(&[("Variogram", "old release")]);
    let v2 = build_test_record(&[("Intro", "new release"), ("Variogram", "new release")]);
    assert_eq!(ids(&query(&v1, "variogram").unwrap()), vec![0]);
    assert_eq!(ids(&query(&v2, "variogram").unwrap()), vec![1]);
}
