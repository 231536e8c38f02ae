// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: from extracted documents to an `IndexRecord`.
//!
//! `build_record` is a pure function of its inputs. Same documents, same
//! options, same record, down to the serialized byte. Everything here uses
//! ordered containers and integer weights for exactly that reason.

mod inverted;

pub use inverted::*;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::analyzer::{AnalyzerConfig, ANALYZER_VERSION};
use crate::build::Document;
use crate::error::BuildError;
use crate::format::MAX_DOC_COUNT;
use crate::types::{DocId, EnvVersions, IndexRecord, ObjectEntry, ObjectKind};
use crate::verify::validate_record;

/// Version of the object table layout.
pub const OBJECTS_VERSION: u32 = 1;

/// Env-version key for the analyzer.
pub const ENV_ANALYZER: &str = "docsieve.analyzer";

/// Env-version key for the object table.
pub const ENV_OBJECTS: &str = "docsieve.objects";

/// The env versions every record built by this crate carries.
///
/// Readers pass this to `IndexRecord::check_env` to detect records built by
/// an incompatible builder.
pub fn builtin_env_versions() -> EnvVersions {
    let mut env = BTreeMap::new();
    env.insert(ENV_ANALYZER.to_string(), ANALYZER_VERSION);
    env.insert(ENV_OBJECTS.to_string(), OBJECTS_VERSION);
    env
}

/// Knobs for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub analyzer: AnalyzerConfig,
    /// Appended to a docname when a document has no explicit filename.
    pub source_suffix: String,
    /// Extra env versions, e.g. the documentation tool's own domain versions.
    pub env_versions: EnvVersions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            source_suffix: ".rst".to_string(),
            env_versions: EnvVersions::new(),
        }
    }
}

/// Build an index record from documents. Document ids follow slice order.
///
/// Fails without producing anything if a docname repeats, an object points
/// at an unknown docname, or the corpus is larger than `MAX_DOC_COUNT`.
pub fn build_record(documents: &[Document], options: &BuildOptions) -> Result<IndexRecord, BuildError> {
    if documents.len() > MAX_DOC_COUNT as usize {
        return Err(BuildError::TooManyDocuments {
            count: documents.len(),
            max: MAX_DOC_COUNT,
        });
    }

    let mut ids: HashMap<&str, DocId> = HashMap::with_capacity(documents.len());
    for (idx, doc) in documents.iter().enumerate() {
        if ids.insert(doc.docname.as_str(), DocId(idx as u32)).is_some() {
            return Err(BuildError::DuplicateDocument(doc.docname.clone()));
        }
    }

    let objects = collect_objects(documents, &ids)?;

    let pairs: Vec<(&str, &str)> = documents
        .iter()
        .map(|d| (d.title.as_str(), d.text.as_str()))
        .collect();
    let per_doc = analyze_documents(&options.analyzer, &pairs);
    let (terms, titleterms) = build_term_tables(&per_doc);
    let wordstems = build_word_stems(&per_doc);

    let mut envversion = options.env_versions.clone();
    envversion.extend(builtin_env_versions());

    let record = IndexRecord {
        envversion,
        analyzer: options.analyzer,
        docnames: documents.iter().map(|d| d.docname.clone()).collect(),
        filenames: documents
            .iter()
            .map(|d| {
                d.filename
                    .clone()
                    .unwrap_or_else(|| format!("{}{}", d.docname, options.source_suffix))
            })
            .collect(),
        titles: documents.iter().map(|d| d.title.clone()).collect(),
        terms,
        titleterms,
        wordstems,
        objects,
    };

    validate_record(&record)?;

    debug!(
        docs = record.doc_count(),
        terms = record.terms.len(),
        titleterms = record.titleterms.len(),
        objects = record.objects.len(),
        "built index record"
    );

    Ok(record)
}

/// Resolve every declared object to its owning document.
fn collect_objects(
    documents: &[Document],
    ids: &HashMap<&str, DocId>,
) -> Result<BTreeMap<String, ObjectEntry>, BuildError> {
    let mut objects = BTreeMap::new();

    for (idx, doc) in documents.iter().enumerate() {
        for obj in &doc.objects {
            let target = match obj.docname.as_deref() {
                None => DocId(idx as u32),
                Some(name) => *ids.get(name).ok_or_else(|| BuildError::DanglingObject {
                    object: obj.name.clone(),
                    owner: doc.docname.clone(),
                    target: name.to_string(),
                })?,
            };

            let entry = match obj.kind {
                ObjectKind::Module => ObjectEntry::Module {
                    doc: target,
                    synopsis: obj.synopsis.clone(),
                },
                ObjectKind::Function => ObjectEntry::Function {
                    doc: target,
                    anchor: obj.anchor.clone().unwrap_or_else(|| obj.name.clone()),
                },
            };

            match objects.entry(obj.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(entry);
                }
                Entry::Occupied(_) => {
                    warn!(
                        object = %obj.name,
                        docname = %doc.docname,
                        "duplicate object description, keeping the first"
                    );
                }
            }
        }
    }

    Ok(objects)
}
