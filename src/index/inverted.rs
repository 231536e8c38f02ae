// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term table construction.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTING_LIST_SORTED**: each posting list is strictly ascending by doc id
//! 2. **NON_EMPTY**: every term has at least one posting
//! 3. **SPLIT**: a (term, doc) pair is in `titleterms` iff the term is in the
//!    doc's title, otherwise in `terms`. Never both.
//! 4. **WEIGHT**: weight = occurrences in title + body, always >= 1
//! 5. **WORD_STEMS**: only words whose term differs, each pointing at a stored term
//!
//! Map phase (per document, parallel under `parallel`) produces term counts.
//! Reduce phase walks documents in id order and appends, so posting lists
//! come out sorted without an extra pass and the result never depends on
//! thread scheduling.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::analyzer::AnalyzerConfig;
use crate::types::{DocId, Posting, PostingTable, WordStems};

/// Per-document output of the map phase.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocTerms {
    /// Term → occurrences across title and body.
    pub counts: BTreeMap<String, u32>,
    /// Terms that occur in the title.
    pub title: BTreeSet<String>,
    /// Words the analyzer rewrote, with their terms.
    pub stems: WordStems,
}

impl DocTerms {
    fn record(&mut self, word: String, term: String, in_title: bool) {
        *self.counts.entry(term.clone()).or_insert(0) += 1;
        if in_title {
            self.title.insert(term.clone());
        }
        if word != term {
            self.stems.insert(word, term);
        }
    }
}

/// Tokenize one document.
pub fn analyze_document(analyzer: &AnalyzerConfig, title: &str, text: &str) -> DocTerms {
    let mut doc = DocTerms::default();
    for (word, term) in analyzer.word_terms(title) {
        doc.record(word, term, true);
    }
    for (word, term) in analyzer.word_terms(text) {
        doc.record(word, term, false);
    }
    doc
}

/// Map phase over all `(title, text)` pairs, preserving input order.
pub fn analyze_documents(analyzer: &AnalyzerConfig, docs: &[(&str, &str)]) -> Vec<DocTerms> {
    #[cfg(feature = "parallel")]
    let iter = docs.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = docs.iter();

    iter.map(|(title, text)| analyze_document(analyzer, title, text))
        .collect()
}

/// Reduce phase: merge per-document counts into the two posting tables.
///
/// `per_doc[i]` must belong to `DocId(i)`.
pub fn build_term_tables(per_doc: &[DocTerms]) -> (PostingTable, PostingTable) {
    let mut terms: PostingTable = BTreeMap::new();
    let mut titleterms: PostingTable = BTreeMap::new();

    for (doc_idx, doc) in per_doc.iter().enumerate() {
        let doc_id = DocId(doc_idx as u32);
        for (term, &count) in &doc.counts {
            let table = if doc.title.contains(term) {
                &mut titleterms
            } else {
                &mut terms
            };
            table
                .entry(term.clone())
                .or_default()
                .push(Posting(doc_id, count));
        }
    }

    (terms, titleterms)
}

/// Merge per-document word stems. One analyzer maps a word to one term, so
/// documents never disagree.
pub fn build_word_stems(per_doc: &[DocTerms]) -> WordStems {
    let mut stems = WordStems::new();
    for doc in per_doc {
        for (word, term) in &doc.stems {
            stems.entry(word.clone()).or_insert_with(|| term.clone());
        }
    }
    stems
}
