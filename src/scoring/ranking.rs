// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored documents get sorted.
//!
//! Sort order is fixed: score descending, then doc id ascending. The doc id
//! tiebreak means two documents with identical scores always come back in
//! the same order, build after build.

use std::cmp::Ordering;

use crate::types::DocId;

/// A document with its aggregate query score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub doc_id: DocId,
    pub score: f64,
}

/// Compare two ranked documents.
///
/// 1. **Score** - higher wins
/// 2. **Doc ID** - lower wins when scores are equal
pub fn compare_ranked(a: &Ranked, b: &Ranked) -> Ordering {
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.doc_id.cmp(&b.doc_id),
    }
}

/// Sort in place into final result order.
pub fn sort_ranked(ranked: &mut [Ranked]) {
    ranked.sort_by(compare_ranked);
}
