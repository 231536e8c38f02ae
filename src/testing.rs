//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::build::{Document, DocumentedObject};
use crate::index::{build_record, BuildOptions};
use crate::types::{IndexRecord, ObjectKind};

/// Create a document with no objects and no explicit filename.
pub fn make_doc(docname: &str, title: &str, text: &str) -> Document {
    Document {
        docname: docname.to_string(),
        filename: None,
        title: title.to_string(),
        text: text.to_string(),
        objects: vec![],
    }
}

/// Create an object declaration owned by the declaring document.
pub fn make_object(name: &str, kind: ObjectKind) -> DocumentedObject {
    DocumentedObject {
        name: name.to_string(),
        kind,
        anchor: None,
        docname: None,
        synopsis: None,
    }
}

/// Build a record from `(title, text)` pairs with docnames `doc0`, `doc1`, ...
pub fn build_test_record(pages: &[(&str, &str)]) -> IndexRecord {
    let docs: Vec<Document> = pages
        .iter()
        .enumerate()
        .map(|(i, (title, text))| make_doc(&format!("doc{}", i), title, text))
        .collect();
    build_record(&docs, &BuildOptions::default()).expect("test corpus is consistent")
}

/// The two-page corpus used throughout the docs and tests.
pub fn variogram_corpus() -> IndexRecord {
    build_test_record(&[
        (
            "Estimate a Variogram",
            "This example shows how to estimate a variogram with the toolbox.",
        ),
        (
            "Hydrobox Examples",
            "A gallery of examples: estimate, interpolate and plot with the toolbox.",
        ),
    ])
}
