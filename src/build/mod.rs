pub mod document;
pub mod manifest;
pub mod parallel;

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::error::BuildError;
use crate::format::{encode, RecordFormat};
use crate::index::{build_record, BuildOptions};

pub use document::*;
pub use manifest::*;
pub use parallel::*;

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Written record.
    pub output: PathBuf,
    pub doc_count: usize,
    pub term_count: usize,
    pub object_count: usize,
    pub bytes: usize,
}

/// Create a progress style for the main progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Read `manifest.json` from the input directory.
pub fn read_manifest(input_dir: &Path) -> Result<InputManifest, BuildError> {
    let manifest_path = input_dir.join("manifest.json");
    let content = fs::read_to_string(&manifest_path).map_err(|e| {
        BuildError::Manifest(format!("Failed to read {}: {}", manifest_path.display(), e))
    })?;
    let manifest: InputManifest = serde_json::from_str(&content)
        .map_err(|e| BuildError::Manifest(format!("Invalid manifest JSON: {}", e)))?;
    manifest.check_version().map_err(BuildError::Manifest)?;
    Ok(manifest)
}

/// Build the index for `input_dir` and write it into `output_dir`.
///
/// Nothing is written unless every step before the write succeeds, and the
/// write itself goes through a temporary file plus rename, so readers see
/// either the old record or the new one. An empty manifest still writes a
/// record (with no documents) so a stale one never outlives its input.
pub fn run_build(
    input_dir: &Path,
    output_dir: &Path,
    format: RecordFormat,
) -> Result<BuildSummary, BuildError> {
    // 1. Read manifest
    let manifest = read_manifest(input_dir)?;
    debug!(documents = manifest.documents.len(), "read manifest");

    // 2. Load documents in parallel with progress bar
    #[cfg(feature = "parallel")]
    let multi = MultiProgress::new();
    #[cfg(feature = "parallel")]
    let load_pb = multi.add(ProgressBar::new(manifest.documents.len() as u64));
    #[cfg(feature = "parallel")]
    load_pb.set_style(create_progress_style());
    #[cfg(feature = "parallel")]
    load_pb.set_prefix("Loading");
    #[cfg(feature = "parallel")]
    load_pb.set_message("documents...");

    let documents = parallel::load_documents_with_progress(
        input_dir,
        &manifest,
        #[cfg(feature = "parallel")]
        &load_pb,
    )?;

    #[cfg(feature = "parallel")]
    load_pb.finish_with_message(format!("loaded {} documents", documents.len()));

    if documents.is_empty() {
        warn!(input = %input_dir.display(), "no documents listed; writing an empty index");
    }

    // 3. Build the record
    let options = BuildOptions {
        analyzer: manifest.analyzer,
        source_suffix: manifest.source_suffix.clone(),
        env_versions: manifest.env_versions.clone(),
    };
    let record = build_record(&documents, &options)?;
    let bytes = encode(&record, format)?;

    // 4. Write atomically
    let path = output_dir.join(format.file_name());
    write_atomic(&path, &bytes)?;

    let summary = BuildSummary {
        output: path,
        doc_count: record.doc_count(),
        term_count: record.term_count(),
        object_count: record.objects.len(),
        bytes: bytes.len(),
    };
    info!(
        docs = summary.doc_count,
        terms = summary.term_count,
        objects = summary.object_count,
        bytes = summary.bytes,
        output = %output_dir.display(),
        "wrote search index"
    );
    Ok(summary)
}

/// Write `bytes` to `path` via a sibling temp file and a rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), BuildError> {
    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()));

    fs::write(&tmp, bytes).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }
    Ok(())
}
