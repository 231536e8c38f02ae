//! Static search index for documentation sites.
//!
//! A documentation build produces one immutable, versioned record: document
//! names, filenames and titles, a term table, a title-term table, an API
//! object table and an environment-version table. A browser widget (or the
//! `docsieve search` command) loads that record and answers queries from it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  build       │────▶│  index       │────▶│  format      │──▶ searchindex.js
//! │ (manifest,   │     │ (analyzer,   │     │ (checksum,   │
//! │  documents)  │     │  postings)   │     │  envelope)   │
//! └──────────────┘     └──────────────┘     └──────┬───────┘
//!                              │                   │ load
//!                              ▼                   ▼
//!                      ┌──────────────┐     ┌──────────────┐
//!                      │  verify      │◀────│  search      │
//!                      │ (invariants) │     │ (scoring,    │
//!                      └──────────────┘     │  ranking)    │
//!                                           └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use docsieve::build::Document;
//! use docsieve::index::{build_record, BuildOptions};
//! use docsieve::search::query;
//!
//! let docs = vec![
//!     Document {
//!         docname: "plot_variogram".into(),
//!         filename: None,
//!         title: "Estimate a Variogram".into(),
//!         text: "Estimate a variogram from field data.".into(),
//!         objects: vec![],
//!     },
//! ];
//! let record = build_record(&docs, &BuildOptions::default()).unwrap();
//!
//! let results = query(&record, "variogram").unwrap();
//! let hit = results.iter().next().unwrap();
//! assert_eq!(hit.title, "Estimate a Variogram");
//! assert_eq!(hit.filename, "plot_variogram.rst");
//! ```

pub mod analyzer;
pub mod build;
pub mod error;
pub mod format;
pub mod index;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
pub mod verify;

pub use analyzer::AnalyzerConfig;
pub use build::{run_build, BuildSummary, Document, DocumentedObject};
pub use error::{BuildError, LoadError, QueryError};
pub use format::{load, RecordFormat, FORMAT_VERSION};
pub use index::{build_record, builtin_env_versions, BuildOptions};
pub use search::{query, SearchHit, SearchResults};
pub use types::{DocId, IndexRecord, ObjectEntry, ObjectKind};
pub use verify::{validate_record, InvariantError};
