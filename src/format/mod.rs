// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk format for index records.
//!
//! A record is one JSON object with fixed top-level keys:
//!
//! ```text
//! {
//!   "format": 1,                  ◀── checked before anything else is parsed
//!   "checksum": 2893476551,       ◀── CRC32 of the canonical body
//!   "envversion": {...},          ◀── extension → version, for staleness
//!   "analyzer": {...},            ◀── tokenizer policy queries must reuse
//!   "docnames": [...], "filenames": [...], "titles": [...],
//!   "terms": {...}, "titleterms": {...},
//!   "wordstems": {...},           ◀── indexed word → its term, for prefixes
//!   "objects": {...}
//! }
//! ```
//!
//! The `Js` flavour wraps the same JSON in `Search.setIndex(...)` so a page
//! can pull it in with a plain `<script>` tag. `decode` accepts both.
//!
//! # Security Considerations
//!
//! Records may come from a CDN or a cache, so decoding treats them as
//! untrusted: size is capped before parsing, the version is probed before
//! the full parse, the checksum catches bit rot, and `validate_record`
//! catches anything structurally inconsistent that still checksums fine.

mod envelope;

pub use envelope::{strip_js_wrapper, JS_PREFIX, JS_SUFFIX};

use std::fs;
use std::path::Path;

use crc32fast::Hasher as Crc32Hasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LoadError;
use crate::types::{EnvVersions, IndexRecord};
use crate::verify::validate_record;

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Maximum record size: 100 MB (prevents huge allocations).
pub const MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

/// Maximum number of documents.
pub const MAX_DOC_COUNT: u32 = 10_000_000;

/// How a record is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFormat {
    #[default]
    Json,
    Js,
}

impl RecordFormat {
    /// Conventional file name for this flavour.
    pub fn file_name(self) -> &'static str {
        match self {
            RecordFormat::Json => "searchindex.json",
            RecordFormat::Js => "searchindex.js",
        }
    }
}

#[derive(Serialize)]
struct StoredRecordRef<'a> {
    format: u32,
    checksum: u32,
    #[serde(flatten)]
    record: &'a IndexRecord,
}

#[derive(Deserialize)]
struct StoredRecord {
    checksum: u32,
    #[serde(flatten)]
    record: IndexRecord,
}

#[derive(Deserialize)]
struct FormatProbe {
    format: Option<u32>,
}

/// CRC32 over the canonical serialization of `record`.
pub fn checksum(record: &IndexRecord) -> Result<u32, serde_json::Error> {
    let body = serde_json::to_vec(record)?;
    let mut hasher = Crc32Hasher::new();
    hasher.update(&body);
    Ok(hasher.finalize())
}

/// Serialize a record. Deterministic: equal records give equal bytes.
pub fn encode(record: &IndexRecord, format: RecordFormat) -> Result<Vec<u8>, serde_json::Error> {
    let stored = StoredRecordRef {
        format: FORMAT_VERSION,
        checksum: checksum(record)?,
        record,
    };
    let json = serde_json::to_vec(&stored)?;

    Ok(match format {
        RecordFormat::Json => json,
        RecordFormat::Js => {
            let mut out = Vec::with_capacity(json.len() + JS_PREFIX.len() + JS_SUFFIX.len());
            out.extend_from_slice(JS_PREFIX.as_bytes());
            out.extend_from_slice(&json);
            out.extend_from_slice(JS_SUFFIX.as_bytes());
            out
        }
    })
}

/// Parse and fully validate a serialized record (either flavour).
pub fn decode(bytes: &[u8]) -> Result<IndexRecord, LoadError> {
    if bytes.len() > MAX_FILE_SIZE {
        return Err(LoadError::TooLarge {
            size: bytes.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let text = std::str::from_utf8(bytes)
        .map_err(|e| LoadError::Malformed(format!("not UTF-8: {}", e)))?;
    let json = strip_js_wrapper(text);

    let probe: FormatProbe =
        serde_json::from_str(json).map_err(|e| LoadError::Malformed(e.to_string()))?;
    match probe.format {
        Some(FORMAT_VERSION) => {}
        Some(found) => {
            return Err(LoadError::VersionMismatch {
                expected: FORMAT_VERSION,
                found,
            })
        }
        None => return Err(LoadError::Malformed("missing 'format' field".to_string())),
    }

    let stored: StoredRecord =
        serde_json::from_str(json).map_err(|e| LoadError::Malformed(e.to_string()))?;

    let computed =
        checksum(&stored.record).map_err(|e| LoadError::Malformed(e.to_string()))?;
    if computed != stored.checksum {
        return Err(LoadError::ChecksumMismatch {
            stored: stored.checksum,
            computed,
        });
    }

    validate_record(&stored.record)?;
    Ok(stored.record)
}

/// Read and decode a record from disk.
pub fn load(path: impl AsRef<Path>) -> Result<IndexRecord, LoadError> {
    let path = path.as_ref();
    let size = fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE as u64 {
        return Err(LoadError::TooLarge {
            size: size as usize,
            max: MAX_FILE_SIZE,
        });
    }

    let bytes = fs::read(path)?;
    let record = decode(&bytes)?;
    debug!(
        path = %path.display(),
        docs = record.doc_count(),
        terms = record.terms.len(),
        "loaded index record"
    );
    Ok(record)
}

impl IndexRecord {
    /// Compare this record's env versions against what the reader expects.
    ///
    /// Every key in `expected` must be present with the same version. Extra
    /// keys in the record are ignored.
    pub fn check_env(&self, expected: &EnvVersions) -> Result<(), LoadError> {
        for (key, &version) in expected {
            let found = self.envversion.get(key).copied();
            if found != Some(version) {
                return Err(LoadError::StaleEnvironment {
                    key: key.clone(),
                    expected: version,
                    found,
                });
            }
        }
        Ok(())
    }
}
