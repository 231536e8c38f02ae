// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query resolution against a loaded `IndexRecord`.
//!
//! Each required word is matched three ways and the best one counts:
//!
//! 1. **Exact**: the word's stem is a key of `titleterms` or `terms`
//! 2. **Prefix**: terms starting with the unstemmed word, plus the terms of
//!    indexed words starting with it (`wordstems`), both via `BTreeMap` range
//!    scans (words of at least `MIN_PREFIX_LEN` characters only)
//! 3. **Object**: a documented object whose last dotted segment is, or whose
//!    name contains, the word
//!
//! A document must match every required word (AND) and no excluded word.
//! Its score is the sum of its per-word scores. The record is only ever
//! borrowed, so any number of threads can query one record at once.

mod query;

pub use query::{parse_query, ParsedQuery, QueryWord, MAX_QUERY_LEN};

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use crate::error::QueryError;
use crate::scoring::ranking::{sort_ranked, Ranked};
use crate::scoring::{object_score, term_base, term_score, Field, MatchKind};
use crate::types::{DocId, IndexRecord, ObjectKind};

/// Shortest word that gets prefix and substring matching.
pub const MIN_PREFIX_LEN: usize = 3;

/// One result row. Title and filename point into the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'a> {
    pub doc_id: DocId,
    pub title: &'a str,
    pub filename: &'a str,
    pub score: f64,
}

/// A documented object that matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHit<'a> {
    pub name: &'a str,
    pub kind: ObjectKind,
    pub doc_id: DocId,
    /// Fragment on the owning page.
    pub anchor: String,
}

/// Ranked results of one query.
///
/// Ranking happens up front; hits are materialized on each `iter()` call,
/// which always starts again from the best hit.
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    record: &'a IndexRecord,
    ranked: Vec<Ranked>,
    /// Best-scoring matched object per document.
    objects: BTreeMap<DocId, &'a str>,
}

impl<'a> SearchResults<'a> {
    fn empty(record: &'a IndexRecord) -> Self {
        Self {
            record,
            ranked: Vec::new(),
            objects: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Hits in rank order.
    pub fn iter(&self) -> impl Iterator<Item = SearchHit<'a>> + '_ {
        let record = self.record;
        self.ranked.iter().filter_map(move |r| {
            Some(SearchHit {
                doc_id: r.doc_id,
                title: record.title(r.doc_id)?,
                filename: record.filename(r.doc_id)?,
                score: r.score,
            })
        })
    }

    /// Document ids in rank order.
    pub fn doc_ids(&self) -> Vec<DocId> {
        self.ranked.iter().map(|r| r.doc_id).collect()
    }

    /// The object that put the best hit where it is, if one did.
    pub fn first_object(&self) -> Option<ObjectHit<'a>> {
        let best = self.ranked.first()?;
        let name = *self.objects.get(&best.doc_id)?;
        let entry = self.record.objects.get(name)?;
        Some(ObjectHit {
            name,
            kind: entry.kind(),
            doc_id: entry.doc(),
            anchor: entry.anchor(name),
        })
    }
}

impl<'r, 'a> IntoIterator for &'r SearchResults<'a> {
    type Item = SearchHit<'a>;
    type IntoIter = Box<dyn Iterator<Item = SearchHit<'a>> + 'r>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Parse `text` with the record's analyzer and run it.
///
/// An unknown term is not an error: the result is simply empty.
pub fn query<'a>(record: &'a IndexRecord, text: &str) -> Result<SearchResults<'a>, QueryError> {
    let parsed = parse_query(text, &record.analyzer)?;
    Ok(execute(record, &parsed))
}

/// Run an already parsed query.
pub fn execute<'a>(record: &'a IndexRecord, parsed: &ParsedQuery) -> SearchResults<'a> {
    let mut acc: Option<BTreeMap<DocId, WordMatch<'a>>> = None;

    for word in &parsed.required {
        let hits = match_word(record, word);
        let merged = match acc {
            None => hits,
            Some(mut prev) => {
                prev.retain(|doc, m| match hits.get(doc) {
                    Some(hit) => {
                        m.add(hit);
                        true
                    }
                    None => false,
                });
                prev
            }
        };
        if merged.is_empty() {
            return SearchResults::empty(record);
        }
        acc = Some(merged);
    }

    let Some(mut matched) = acc else {
        return SearchResults::empty(record);
    };

    if !parsed.excluded.is_empty() {
        let excluded = excluded_docs(record, &parsed.excluded);
        matched.retain(|doc, _| !excluded.contains(doc));
    }

    let mut ranked: Vec<Ranked> = matched
        .iter()
        .map(|(&doc_id, m)| Ranked {
            doc_id,
            score: m.score,
        })
        .collect();
    sort_ranked(&mut ranked);

    let objects = matched
        .into_iter()
        .filter_map(|(doc, m)| m.object.map(|(name, _)| (doc, name)))
        .collect();

    SearchResults {
        record,
        ranked,
        objects,
    }
}

/// Per-document score of one word, or of several words once merged.
#[derive(Debug, Clone, Copy)]
struct WordMatch<'a> {
    score: f64,
    object: Option<(&'a str, f64)>,
}

impl<'a> WordMatch<'a> {
    fn add(&mut self, other: &WordMatch<'a>) {
        self.score += other.score;
        if let Some((name, score)) = other.object {
            self.offer_object(name, score);
        }
    }

    fn offer_object(&mut self, name: &'a str, score: f64) {
        match self.object {
            Some((_, best)) if best >= score => {}
            _ => self.object = Some((name, score)),
        }
    }
}

fn offer_term<'a>(hits: &mut BTreeMap<DocId, WordMatch<'a>>, doc: DocId, score: f64) {
    let m = hits.entry(doc).or_insert(WordMatch {
        score: 0.0,
        object: None,
    });
    m.score = m.score.max(score);
}

fn offer_object<'a>(hits: &mut BTreeMap<DocId, WordMatch<'a>>, doc: DocId, name: &'a str, score: f64) {
    let m = hits.entry(doc).or_insert(WordMatch {
        score: 0.0,
        object: None,
    });
    m.score = m.score.max(score);
    m.offer_object(name, score);
}

/// Best score per document for a single word.
fn match_word<'a>(record: &'a IndexRecord, word: &QueryWord) -> BTreeMap<DocId, WordMatch<'a>> {
    let mut hits = BTreeMap::new();
    let doc_count = record.doc_count();
    let prefix_ok = word.word.chars().count() >= MIN_PREFIX_LEN;
    let partial = if prefix_ok {
        prefix_terms(record, word)
    } else {
        BTreeSet::new()
    };

    for (field, table) in [(Field::Title, &record.titleterms), (Field::Body, &record.terms)] {
        if let Some(postings) = table.get(&word.stem) {
            let df = record.doc_freq(&word.stem);
            let base = term_base(field, MatchKind::Exact);
            for p in postings {
                offer_term(&mut hits, p.doc_id(), term_score(base, p.weight(), df, doc_count));
            }
        }

        let base = term_base(field, MatchKind::Partial);
        for term in &partial {
            let Some(postings) = table.get(*term) else {
                continue;
            };
            let df = record.doc_freq(term);
            for p in postings {
                offer_term(&mut hits, p.doc_id(), term_score(base, p.weight(), df, doc_count));
            }
        }
    }

    for (name, entry) in &record.objects {
        let lower = name.to_lowercase();
        // Query words never contain a dot, so a dotted name can only match on its tail.
        let kind = if lower.rsplit('.').next() == Some(word.word.as_str()) {
            MatchKind::Exact
        } else if prefix_ok && lower.contains(word.word.as_str()) {
            MatchKind::Partial
        } else {
            continue;
        };
        offer_object(
            &mut hits,
            entry.doc(),
            name.as_str(),
            object_score(kind, entry.kind()),
        );
    }

    hits
}

/// Terms a partly typed word may complete to, minus its own exact stem.
///
/// A stored term can be shorter than the word typed so far (`estima` is past
/// `estim`), so the terms of indexed words starting with it count as well.
fn prefix_terms<'a>(record: &'a IndexRecord, word: &QueryWord) -> BTreeSet<&'a str> {
    let mut terms = BTreeSet::new();
    for table in [&record.titleterms, &record.terms] {
        terms.extend(prefix_range(table, &word.word).map(|(term, _)| term.as_str()));
    }
    terms.extend(prefix_range(&record.wordstems, &word.word).map(|(_, term)| term.as_str()));
    terms.remove(word.stem.as_str());
    terms
}

/// All entries whose key starts with `prefix`, in key order.
fn prefix_range<'t, 'p, V>(
    map: &'t BTreeMap<String, V>,
    prefix: &'p str,
) -> impl Iterator<Item = (&'t String, &'t V)> + 'p
where
    't: 'p,
{
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |(key, _)| key.starts_with(prefix))
}

/// Documents holding any excluded word's exact stem.
fn excluded_docs(record: &IndexRecord, words: &[QueryWord]) -> BTreeSet<DocId> {
    let mut out = BTreeSet::new();
    for word in words {
        for table in [&record.titleterms, &record.terms] {
            if let Some(postings) = table.get(&word.stem) {
                out.extend(postings.iter().map(|p| p.doc_id()));
            }
        }
    }
    out
}
