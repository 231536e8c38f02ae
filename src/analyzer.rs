// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning raw documentation text into index terms.
//!
//! The pipeline is the same for documents and for queries, and that is the
//! whole point: if the builder stems `estimate` to `estim` but the query side
//! doesn't, nothing matches. The policy that produced a record is stored in
//! the record itself (`IndexRecord::analyzer`) so readers can't drift.
//!
//! ```text
//! raw text ─▶ strip_markup ─▶ normalize ─▶ split words ─▶ filter ─▶ stem
//!             (<tags>,        (NFD, drop   ([\w_]+)       (length,   (Snowball
//!              :roles:)        marks, lc)                  stop)      English)
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Bumped whenever tokenization changes in a way that alters emitted terms.
/// Recorded in the env-version table so stale indexes are detectable.
pub const ANALYZER_VERSION: u32 = 1;

/// English stop words shipped in `data/stop_words.json`.
static STOP_WORDS: LazyLock<HashSet<String>> = LazyLock::new(|| {
    parse_stop_words_json(include_str!("../data/stop_words.json"))
});

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Markup that carries no searchable prose: HTML tags, entities,
/// reST roles (`:func:`) and directive markers (`.. note::`).
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>|&(?:[A-Za-z]+|#[0-9]+);|\.\.\s+[A-Za-z][\w-]*::|:[A-Za-z][\w-]*(?::[A-Za-z][\w-]*)*:`")
        .expect("markup pattern is valid")
});

/// Flatten `{ "lang": ["word", ...] }` into one set of normalized words.
fn parse_stop_words_json(json_str: &str) -> HashSet<String> {
    let by_lang: std::collections::BTreeMap<String, Vec<String>> =
        serde_json::from_str(json_str).expect("bundled stop word list is valid JSON");
    by_lang
        .into_values()
        .flatten()
        .map(|w| normalize(&w))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Check if a (normalized) word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Tokenizer policy. Stored in every record and applied to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Reduce words to their Snowball English stem.
    pub stem: bool,
    /// Drop English stop words.
    pub stop_words: bool,
    /// Minimum word length in characters.
    pub min_term_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            stem: true,
            stop_words: true,
            min_term_len: 1,
        }
    }
}

impl AnalyzerConfig {
    /// All index terms of `text`, in order of appearance, duplicates kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.word_terms(text).into_iter().map(|(_, term)| term).collect()
    }

    /// Like `tokenize`, but keeps each normalized word next to its term.
    pub fn word_terms(&self, text: &str) -> Vec<(String, String)> {
        let cleaned = strip_markup(text);
        let normalized = normalize(&cleaned);
        words(&normalized)
            .filter_map(|w| self.term(w).map(|t| (w.to_string(), t)))
            .collect()
    }

    /// Map one already-normalized word to its index term, or `None` if the
    /// policy filters it out.
    pub fn term(&self, word: &str) -> Option<String> {
        if word.chars().count() < self.min_term_len.max(1) {
            return None;
        }
        if self.stop_words && is_stop_word(word) {
            return None;
        }
        if !self.stem {
            return Some(word.to_string());
        }
        let stemmed = STEMMER.stem(word);
        // A stem can collapse to a stop word or below the length floor; the
        // word itself is still worth indexing then.
        if stemmed.is_empty()
            || (self.stop_words && is_stop_word(&stemmed))
            || stemmed.chars().count() < self.min_term_len.max(1)
        {
            Some(word.to_string())
        } else {
            Some(stemmed.into_owned())
        }
    }
}

/// A word is a maximal run of alphanumerics or underscores, so identifiers
/// like `bin_func` and `__name__` survive as one token.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split normalized text into words. Pure underscore runs are not words.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty() && w.chars().any(char::is_alphanumeric))
}

/// Replace markup with spaces so neighbouring words don't fuse.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, " ").into_owned()
}

/// Normalize a string for search: lowercase, strip diacritics, and collapse whitespace.
///
/// - "Mälicke" → "malicke"
/// - "naïve" → "naive"
#[cfg(feature = "unicode-normalization")]
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and collapse whitespace only. Assumes ASCII or pre-normalized input.
#[cfg(not(feature = "unicode-normalization"))]
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combining marks (Unicode category Mn) in the common diacritic blocks.
#[cfg(feature = "unicode-normalization")]
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1AB0}'..='\u{1AFF}' |  // Combining Diacritical Marks Extended
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}
