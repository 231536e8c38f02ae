// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel document loading.
//!
//! Reading and parsing the per-page JSON files is the one part of a build
//! that scales with corpus size on disk, and it's embarrassingly parallel.
//! `par_iter().collect()` keeps manifest order, so doc ids (and therefore the
//! output bytes) never depend on which thread finished first.

use std::fs;
use std::path::Path;

#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::BuildError;

use super::{Document, InputManifest};

/// Read and parse one document file.
pub fn load_document(input_dir: &Path, filename: &str) -> Result<Document, BuildError> {
    let path = input_dir.join(filename);
    let content = fs::read_to_string(&path).map_err(|source| BuildError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str::<Document>(&content).map_err(|source| BuildError::Document { path, source })
}

/// Load all documents listed in the manifest, in manifest order.
///
/// The first failure aborts the load.
pub fn load_documents(input_dir: &Path, manifest: &InputManifest) -> Result<Vec<Document>, BuildError> {
    #[cfg(feature = "parallel")]
    let iter = manifest.documents.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = manifest.documents.iter();

    iter.map(|filename| load_document(input_dir, filename))
        .collect()
}

/// Load all documents in parallel with progress reporting.
#[cfg(feature = "parallel")]
pub fn load_documents_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
    progress: &ProgressBar,
) -> Result<Vec<Document>, BuildError> {
    let counter = AtomicUsize::new(0);
    let total = manifest.documents.len();

    manifest
        .documents
        .par_iter()
        .map(|filename| {
            let doc = load_document(input_dir, filename)?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count % 10 == 0 || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            Ok(doc)
        })
        .collect()
}

/// Non-parallel fallback (no progress).
#[cfg(not(feature = "parallel"))]
pub fn load_documents_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
) -> Result<Vec<Document>, BuildError> {
    load_documents(input_dir, manifest)
}
