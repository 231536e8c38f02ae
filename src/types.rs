// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of an index record.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **IndexRecord**: `docnames.len() = filenames.len() = titles.len()`.
//!   The per-document tables are indexed by `DocId` directly, so they must
//!   line up. Off-by-one here means the wrong page opens.
//!
//! - **Posting lists**: non-empty, strictly ascending by `DocId`, every
//!   `weight >= 1`, every `DocId < doc_count`.
//!
//! - **Term/title-term split**: a (term, doc) pair lives in exactly one of
//!   the two tables. If the term occurs in the document's title it goes to
//!   `titleterms`, otherwise to `terms`.
//!
//! - **Word stems**: every value of `wordstems` is a key of `terms` or
//!   `titleterms`, and no entry maps a word to itself.
//!
//! `verify::validate_record` checks all of the above.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalyzerConfig;

/// Type-safe document identifier. Dense, starting at 0, stable within one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for table indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One (document, weight) entry of a posting list. Serialized as `[doc, weight]`.
///
/// The weight is the number of times the term occurs in the document,
/// title and body together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting(pub DocId, pub u32);

impl Posting {
    #[inline]
    pub fn doc_id(&self) -> DocId {
        self.0
    }

    #[inline]
    pub fn weight(&self) -> u32 {
        self.1
    }
}

/// Term → postings, ordered by term so prefix lookups are range scans.
pub type PostingTable = BTreeMap<String, Vec<Posting>>;

/// Extension name → version. A mismatch means the index is stale.
pub type EnvVersions = BTreeMap<String, u32>;

/// Indexed word → the term it was stored under, for words the analyzer changed.
///
/// Term keys alone can't answer a partly typed word once it runs past its
/// stem (`estima` is not a prefix of `estim`), so prefix lookups scan this too.
pub type WordStems = BTreeMap<String, String>;

/// The kind of a documented object, as declared in source documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Module,
    Function,
}

impl ObjectKind {
    /// Human-readable label shown next to object hits.
    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectKind::Module => "Python module",
            ObjectKind::Function => "Python function",
        }
    }
}

/// A documented object in the record. Each variant carries only what it needs.
///
/// Modules always anchor at `module-<name>`. Functions carry their anchor
/// because autosummary stubs and hand-written pages disagree on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectEntry {
    Module {
        doc: DocId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        synopsis: Option<String>,
    },
    Function {
        doc: DocId,
        anchor: String,
    },
}

impl ObjectEntry {
    pub fn doc(&self) -> DocId {
        match self {
            ObjectEntry::Module { doc, .. } | ObjectEntry::Function { doc, .. } => *doc,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectEntry::Module { .. } => ObjectKind::Module,
            ObjectEntry::Function { .. } => ObjectKind::Function,
        }
    }

    /// Fragment identifier on the owning page.
    pub fn anchor(&self, name: &str) -> String {
        match self {
            ObjectEntry::Module { .. } => format!("module-{}", name),
            ObjectEntry::Function { anchor, .. } => anchor.clone(),
        }
    }
}

/// The complete search index for one documentation build.
///
/// Immutable once built: there are no `&mut self` methods, and readers on
/// any number of threads can share one `&IndexRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub envversion: EnvVersions,
    pub analyzer: AnalyzerConfig,
    pub docnames: Vec<String>,
    pub filenames: Vec<String>,
    pub titles: Vec<String>,
    pub terms: PostingTable,
    pub titleterms: PostingTable,
    pub wordstems: WordStems,
    pub objects: BTreeMap<String, ObjectEntry>,
}

impl IndexRecord {
    /// Number of documents.
    #[inline]
    pub fn doc_count(&self) -> usize {
        self.docnames.len()
    }

    /// Title of a document. O(1).
    #[inline]
    pub fn title(&self, doc: DocId) -> Option<&str> {
        self.titles.get(doc.as_usize()).map(String::as_str)
    }

    /// Source filename of a document. O(1).
    #[inline]
    pub fn filename(&self, doc: DocId) -> Option<&str> {
        self.filenames.get(doc.as_usize()).map(String::as_str)
    }

    /// Docname of a document. O(1).
    #[inline]
    pub fn docname(&self, doc: DocId) -> Option<&str> {
        self.docnames.get(doc.as_usize()).map(String::as_str)
    }

    /// Number of documents containing `term` in either table.
    ///
    /// The split guarantees a document appears in at most one of the two
    /// lists for the same term, so the lengths simply add up.
    pub fn doc_freq(&self, term: &str) -> usize {
        let body = self.terms.get(term).map_or(0, Vec::len);
        let title = self.titleterms.get(term).map_or(0, Vec::len);
        body + title
    }

    /// Total distinct terms across both tables.
    pub fn term_count(&self) -> usize {
        let titles_only = self
            .titleterms
            .keys()
            .filter(|t| !self.terms.contains_key(*t))
            .count();
        self.terms.len() + titles_only
    }
}
