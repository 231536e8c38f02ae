// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural invariants of an index record.
//!
//! Run twice in a record's life: once right after the builder assembles it,
//! and once after a reader deserializes it. A record that fails here is never
//! handed to a searcher.

use std::collections::HashSet;

use thiserror::Error;

use crate::analyzer::normalize;
use crate::types::{IndexRecord, PostingTable};

/// Which of the two posting tables a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Terms,
    TitleTerms,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Table::Terms => "terms",
            Table::TitleTerms => "titleterms",
        })
    }
}

/// Errors that occur when record invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("per-document tables disagree: {docnames} docnames, {filenames} filenames, {titles} titles")]
    MismatchedDocTables {
        docnames: usize,
        filenames: usize,
        titles: usize,
    },

    #[error("{table}['{term}'] references doc {doc_id} but only {doc_count} documents exist")]
    InvalidDocId {
        table: Table,
        term: String,
        doc_id: u32,
        doc_count: usize,
    },

    #[error("{table}['{term}'] is empty")]
    EmptyPostingList { table: Table, term: String },

    #[error("{table}['{term}'] not strictly ascending at position {position}")]
    UnsortedPostingList {
        table: Table,
        term: String,
        position: usize,
    },

    #[error("{table}['{term}'] has zero weight for doc {doc_id}")]
    ZeroWeight {
        table: Table,
        term: String,
        doc_id: u32,
    },

    #[error("{table} key '{term}' is not a normalized term")]
    UnnormalizedTerm { table: Table, term: String },

    #[error("doc {doc_id} appears under '{term}' in both terms and titleterms")]
    SplitViolation { term: String, doc_id: u32 },

    #[error("object '{name}' references doc {doc_id} but only {doc_count} documents exist")]
    DanglingObject {
        name: String,
        doc_id: u32,
        doc_count: usize,
    },

    #[error("word '{word}' maps to '{term}', which is not an indexed term")]
    DanglingWordStem { word: String, term: String },

    #[error("word '{0}' is not a normalized word or maps to itself")]
    InvalidWordStem(String),

    #[error("docname '{0}' appears more than once")]
    DuplicateDocname(String),
}

/// Check every structural invariant of `record`.
pub fn validate_record(record: &IndexRecord) -> Result<(), InvariantError> {
    let doc_count = record.docnames.len();
    if record.filenames.len() != doc_count || record.titles.len() != doc_count {
        return Err(InvariantError::MismatchedDocTables {
            docnames: doc_count,
            filenames: record.filenames.len(),
            titles: record.titles.len(),
        });
    }

    let mut seen = HashSet::with_capacity(doc_count);
    for name in &record.docnames {
        if !seen.insert(name.as_str()) {
            return Err(InvariantError::DuplicateDocname(name.clone()));
        }
    }

    validate_table(&record.terms, Table::Terms, doc_count)?;
    validate_table(&record.titleterms, Table::TitleTerms, doc_count)?;

    for (term, title_postings) in &record.titleterms {
        let Some(body_postings) = record.terms.get(term) else {
            continue;
        };
        for p in title_postings {
            if body_postings
                .binary_search_by_key(&p.doc_id(), |b| b.doc_id())
                .is_ok()
            {
                return Err(InvariantError::SplitViolation {
                    term: term.clone(),
                    doc_id: p.doc_id().get(),
                });
            }
        }
    }

    for (word, term) in &record.wordstems {
        if word == term || word.is_empty() || normalize(word) != *word || word.contains(' ') {
            return Err(InvariantError::InvalidWordStem(word.clone()));
        }
        if !record.terms.contains_key(term) && !record.titleterms.contains_key(term) {
            return Err(InvariantError::DanglingWordStem {
                word: word.clone(),
                term: term.clone(),
            });
        }
    }

    for (name, entry) in &record.objects {
        if entry.doc().as_usize() >= doc_count {
            return Err(InvariantError::DanglingObject {
                name: name.clone(),
                doc_id: entry.doc().get(),
                doc_count,
            });
        }
    }

    Ok(())
}

fn validate_table(table: &PostingTable, which: Table, doc_count: usize) -> Result<(), InvariantError> {
    for (term, postings) in table {
        if term.is_empty() || normalize(term) != *term || term.contains(' ') {
            return Err(InvariantError::UnnormalizedTerm {
                table: which,
                term: term.clone(),
            });
        }
        if postings.is_empty() {
            return Err(InvariantError::EmptyPostingList {
                table: which,
                term: term.clone(),
            });
        }
        for (position, p) in postings.iter().enumerate() {
            if p.doc_id().as_usize() >= doc_count {
                return Err(InvariantError::InvalidDocId {
                    table: which,
                    term: term.clone(),
                    doc_id: p.doc_id().get(),
                    doc_count,
                });
            }
            if p.weight() == 0 {
                return Err(InvariantError::ZeroWeight {
                    table: which,
                    term: term.clone(),
                    doc_id: p.doc_id().get(),
                });
            }
            if position > 0 && postings[position - 1].doc_id() >= p.doc_id() {
                return Err(InvariantError::UnsortedPostingList {
                    table: which,
                    term: term.clone(),
                    position,
                });
            }
        }
    }
    Ok(())
}
