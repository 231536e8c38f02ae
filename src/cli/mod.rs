// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the docsieve command-line interface.
//!
//! Three subcommands: `index` to build a search index from extracted pages,
//! `inspect` to examine a written record, and `search` to query one.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use docsieve::format::RecordFormat;

#[derive(Parser)]
#[command(
    name = "docsieve",
    about = "Static search index builder for documentation sites",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// On-disk flavour of the written record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain JSON (`searchindex.json`)
    Json,
    /// JSON wrapped in `Search.setIndex(...)` (`searchindex.js`)
    Js,
}

impl From<OutputFormat> for RecordFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => RecordFormat::Json,
            OutputFormat::Js => RecordFormat::Js,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search index from a directory of extracted documents
    Index {
        /// Input directory containing manifest.json and document files
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the search index
        #[arg(short, long)]
        output: PathBuf,

        /// Record flavour to write
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Js)]
        format: OutputFormat,
    },

    /// Inspect a search index file
    Inspect {
        /// Path to searchindex.json or searchindex.js
        file: PathBuf,
    },

    /// Search an index file and display results
    Search {
        /// Path to searchindex.json or searchindex.js
        file: PathBuf,

        /// Search query (`-word` excludes)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Maximum number of results to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}
