// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing.
//!
//! A query is whitespace-separated tokens. A token starting with `-`
//! excludes documents. Every token is normalized with the record's own
//! analyzer so query terms and index terms agree on stemming and stop words.

use crate::analyzer::{normalize, words, AnalyzerConfig};
use crate::error::QueryError;

/// Longest accepted query, in characters.
pub const MAX_QUERY_LEN: usize = 512;

/// One query word in both of its forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryWord {
    /// Normalized but unstemmed; used for prefix and object matching.
    pub word: String,
    /// Index term; used for exact matching.
    pub stem: String,
}

/// A validated query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Every one of these must match.
    pub required: Vec<QueryWord>,
    /// None of these may match.
    pub excluded: Vec<QueryWord>,
}

impl ParsedQuery {
    /// No required words. Such a query matches nothing.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

/// Validate and tokenize a query string.
pub fn parse_query(text: &str, analyzer: &AnalyzerConfig) -> Result<ParsedQuery, QueryError> {
    let len = text.chars().count();
    if len > MAX_QUERY_LEN {
        return Err(QueryError::TooLong {
            len,
            max: MAX_QUERY_LEN,
        });
    }
    if let Some(c) = text.chars().find(|c| c.is_control() && !c.is_whitespace()) {
        return Err(QueryError::InvalidCharacter(c as u32));
    }

    let mut parsed = ParsedQuery::default();
    for token in text.split_whitespace() {
        let (negated, body) = match token.strip_prefix('-') {
            Some(rest) if !rest.is_empty() => (true, rest),
            _ => (false, token),
        };
        let normalized = normalize(body);
        for word in words(&normalized) {
            let Some(stem) = analyzer.term(word) else {
                continue;
            };
            let target = if negated {
                &mut parsed.excluded
            } else {
                &mut parsed.required
            };
            if !target.iter().any(|w| w.word == word) {
                target.push(QueryWord {
                    word: word.to_string(),
                    stem,
                });
            }
        }
    }

    Ok(parsed)
}
