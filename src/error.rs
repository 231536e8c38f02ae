// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the three fallible operations: build, load, query.
//!
//! `BuildError` and `LoadError` abort their operation outright. There is no
//! partially built or partially loaded record. `QueryError` is the only
//! recoverable one: callers show an empty result list plus `hint()`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::verify::InvariantError;

/// Failure while turning a corpus into an index record.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid document JSON in {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate document '{0}'")]
    DuplicateDocument(String),

    #[error("Object '{object}' in '{owner}' references unknown document '{target}'")]
    DanglingObject {
        object: String,
        owner: String,
        target: String,
    },

    #[error("Too many documents: {count} (max {max})")]
    TooManyDocuments { count: usize, max: u32 },

    #[error("Built record violates an invariant: {0}")]
    Invariant(#[from] InvariantError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure while loading a serialized record.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Record too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Format version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Checksum mismatch: stored {stored:08x}, computed {computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("Record fails validation: {0}")]
    Invalid(#[from] InvariantError),

    #[error("Stale index: '{key}' expected version {expected}, found {found:?}")]
    StaleEnvironment {
        key: String,
        expected: u32,
        found: Option<u32>,
    },
}

impl LoadError {
    /// True when the record is well-formed but was built by an incompatible
    /// builder or environment, so re-fetching or rebuilding will fix it.
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            LoadError::VersionMismatch { .. } | LoadError::StaleEnvironment { .. }
        )
    }
}

/// A query string the searcher refuses to evaluate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("Query contains control character U+{0:04X}")]
    InvalidCharacter(u32),
}

impl QueryError {
    /// Short message suitable for showing next to an empty result list.
    pub fn hint(&self) -> String {
        match self {
            QueryError::TooLong { max, .. } => {
                format!("Search terms are limited to {} characters.", max)
            }
            QueryError::InvalidCharacter(_) => {
                "Search terms may not contain control characters.".to_string()
            }
        }
    }
}
