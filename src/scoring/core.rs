// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! Every hit starts from a base score picked by *where* it matched and *how*:
//!
//! | Match              | Base | Constant          |
//! |--------------------|------|-------------------|
//! | title, exact stem  | 15   | `TITLE_EXACT`     |
//! | object, exact name | 11   | `OBJECT_EXACT`    |
//! | title, prefix      | 7    | `TITLE_PARTIAL`   |
//! | object, substring  | 6    | `OBJECT_PARTIAL`  |
//! | body, exact stem   | 5    | `TERM_EXACT`      |
//! | body, prefix       | 2    | `TERM_PARTIAL`    |
//!
//! Term hits are then scaled by tf-idf:
//!
//! ```text
//! score = base × (1 + ln tf) × ln(1 + N / df)
//! ```
//!
//! Object hits get a flat priority bonus instead (modules outrank functions).
//! The values match the scorer the documentation widget has always shipped,
//! so switching index builders doesn't reshuffle anyone's results.

use crate::types::ObjectKind;

/// Exact stem match in a title.
pub const TITLE_EXACT: f64 = 15.0;

/// Prefix match in a title.
pub const TITLE_PARTIAL: f64 = 7.0;

/// Exact stem match in body text.
pub const TERM_EXACT: f64 = 5.0;

/// Prefix match in body text.
pub const TERM_PARTIAL: f64 = 2.0;

/// Query word equals an object's full name or its last dotted segment.
pub const OBJECT_EXACT: f64 = 11.0;

/// Query word occurs somewhere in an object's full name.
pub const OBJECT_PARTIAL: f64 = 6.0;

/// Bonus for objects with important priority (modules).
pub const PRIORITY_IMPORTANT: f64 = 15.0;

/// Bonus for objects with default priority (functions).
pub const PRIORITY_DEFAULT: f64 = 5.0;

/// Which table a term hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
}

/// Exact stem hit or prefix/substring hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
}

/// Base score for a term hit.
pub fn term_base(field: Field, kind: MatchKind) -> f64 {
    match (field, kind) {
        (Field::Title, MatchKind::Exact) => TITLE_EXACT,
        (Field::Title, MatchKind::Partial) => TITLE_PARTIAL,
        (Field::Body, MatchKind::Exact) => TERM_EXACT,
        (Field::Body, MatchKind::Partial) => TERM_PARTIAL,
    }
}

/// tf-idf weighted term score.
///
/// `tf` is the posting weight, `df` the number of documents holding the
/// term, `doc_count` the corpus size. Returns 0 for `df == 0`, which a valid
/// record never produces.
pub fn term_score(base: f64, tf: u32, df: usize, doc_count: usize) -> f64 {
    if df == 0 || tf == 0 {
        return 0.0;
    }
    let tf = 1.0 + (tf as f64).ln();
    let idf = (1.0 + doc_count as f64 / df as f64).ln();
    base * tf * idf
}

/// Search priority bonus of an object kind.
pub fn priority_bonus(kind: ObjectKind) -> f64 {
    match kind {
        ObjectKind::Module => PRIORITY_IMPORTANT,
        ObjectKind::Function => PRIORITY_DEFAULT,
    }
}

/// Score for an object name hit.
pub fn object_score(kind: MatchKind, object_kind: ObjectKind) -> f64 {
    let base = match kind {
        MatchKind::Exact => OBJECT_EXACT,
        MatchKind::Partial => OBJECT_PARTIAL,
    };
    base + priority_bonus(object_kind)
}
