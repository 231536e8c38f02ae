//! Index construction tests: tokenization policy as seen in the record.

use docsieve::analyzer::AnalyzerConfig;
use docsieve::index::{build_record, BuildOptions};
use docsieve::types::{DocId, Posting};

use crate::common::{assert_record_well_formed, make_doc};

fn build(title: &str, text: &str) -> docsieve::IndexRecord {
    let record = build_record(&[make_doc("page", title, text)], &BuildOptions::default()).unwrap();
    assert_record_well_formed(&record);
    record
}

fn has_term(record: &docsieve::IndexRecord, term: &str) -> bool {
    record.terms.contains_key(term) || record.titleterms.contains_key(term)
}

#[test]
fn test_html_markup_is_not_indexed() {
    let record = build("Intro", "wraps <em>SciKit-GStat</em> &amp; <a href=\"x.html\">GSTools</a>");
    assert!(has_term(&record, "gstat"));
    assert!(has_term(&record, "scikit"));
    assert!(has_term(&record, "gstool"));
    assert!(!has_term(&record, "em"));
    assert!(!has_term(&record, "amp"));
    assert!(!has_term(&record, "href"));
}

#[test]
fn test_rest_markup_is_not_indexed() {
    let record = build(
        "Toolboxes",
        ".. autosummary:: variogram\n\nSee :func:`hydrobox.geostat.variogram`.",
    );
    assert!(has_term(&record, "variogram"));
    assert!(has_term(&record, "geostat"));
    assert!(!has_term(&record, "autosummari"));
    assert!(!has_term(&record, "autosummary"));
    assert!(!has_term(&record, "func"));
}

#[test]
fn test_identifiers_stay_whole() {
    let record = build("Parameters", "bin_func and dist_func select lags");
    assert!(has_term(&record, "bin_func"));
    assert!(has_term(&record, "dist_func"));
    assert!(!has_term(&record, "bin"));
}

#[test]
fn test_stop_words_dropped() {
    let record = build("The Variogram", "the variogram of a field");
    assert!(!has_term(&record, "the"));
    assert!(!has_term(&record, "of"));
    assert!(!has_term(&record, "a"));
    assert!(record.titleterms.contains_key("variogram"));
}

#[test]
fn test_diacritics_folded() {
    let record = build("Mälicke", "naïve kriging");
    assert!(record.titleterms.contains_key("malick"));
    assert!(has_term(&record, "naiv"));
}

#[test]
fn test_analyzer_policy_is_recorded() {
    let options = BuildOptions {
        analyzer: AnalyzerConfig {
            stem: false,
            stop_words: true,
            min_term_len: 3,
        },
        ..BuildOptions::default()
    };
    let record = build_record(&[make_doc("p", "Kriging", "ok kriging grids")], &options).unwrap();

    assert_eq!(record.analyzer, options.analyzer);
    assert!(record.titleterms.contains_key("kriging"));
    assert!(record.terms.contains_key("grids"));
    assert!(!record.terms.contains_key("ok"));
}

#[test]
fn test_title_and_body_split() {
    let record = build_record(
        &[
            make_doc("a", "Ordinary Kriging", "kriging on a grid"),
            make_doc("b", "Grids", "simple kriging"),
        ],
        &BuildOptions::default(),
    )
    .unwrap();

    // "krige" is in doc a's title: both occurrences land in titleterms.
    assert_eq!(record.titleterms["krige"], vec![Posting(DocId(0), 2)]);
    assert_eq!(record.terms["krige"], vec![Posting(DocId(1), 1)]);
    assert_eq!(record.doc_freq("krige"), 2);
    assert_eq!(record.titleterms["grid"], vec![Posting(DocId(1), 1)]);
    assert_eq!(record.terms["grid"], vec![Posting(DocId(0), 1)]);
}
