use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use docsieve::build::run_build;
use docsieve::format::{self, RecordFormat, FORMAT_VERSION, JS_PREFIX};
use docsieve::index::builtin_env_versions;
use docsieve::search::query;
use docsieve::types::ObjectKind;

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

type CliResult = Result<(), Box<dyn Error>>;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "docsieve=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            input,
            output,
            format,
        } => cmd_index(&input, &output, format.into()),
        Commands::Inspect { file } => cmd_inspect(&file),
        Commands::Search { file, query, limit } => cmd_search(&file, &query, limit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_index(input: &Path, output: &Path, format: RecordFormat) -> CliResult {
    let summary = run_build(input, output, format)?;

    if summary.doc_count == 0 {
        eprintln!("⚠️  No documents listed; wrote an empty index");
    }

    eprintln!();
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} documents │ {} terms │ {} objects │ {}",
        summary.doc_count,
        summary.term_count,
        summary.object_count,
        format_size(summary.bytes)
    );
    eprintln!("   {}", summary.output.display());
    Ok(())
}

/// Size of `bytes` after brotli at max quality, what a browser actually downloads.
fn brotli_size(bytes: &[u8]) -> std::io::Result<usize> {
    let mut out = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut out, 4096, 11, 22);
        writer.write_all(bytes)?;
    }
    Ok(out.len())
}

fn cmd_inspect(file: &Path) -> CliResult {
    let bytes = fs::read(file)?;
    let record = format::decode(&bytes)?;
    let checksum = format::checksum(&record)?;
    let compressed = brotli_size(&bytes)?;
    let flavour = if String::from_utf8_lossy(&bytes).trim_start().starts_with(JS_PREFIX) {
        "js"
    } else {
        "json"
    };

    section_top("RECORD");
    kv_row("file", &file.display().to_string());
    kv_row("format", &format!("v{} ({})", FORMAT_VERSION, flavour));
    kv_row("checksum", &format!("{:08x}", checksum));
    kv_row("size", &format_size(bytes.len()));
    kv_row(
        "brotli",
        &format!(
            "{} ({})",
            format_size(compressed),
            savings_colored(bytes.len(), compressed)
        ),
    );

    section_mid("TABLES");
    let postings: usize = record
        .terms
        .values()
        .chain(record.titleterms.values())
        .map(Vec::len)
        .sum();
    let modules = record
        .objects
        .values()
        .filter(|o| o.kind() == ObjectKind::Module)
        .count();
    kv_row("documents", &record.doc_count().to_string());
    kv_row("terms", &record.terms.len().to_string());
    kv_row("titleterms", &record.titleterms.len().to_string());
    kv_row("wordstems", &record.wordstems.len().to_string());
    kv_row("postings", &postings.to_string());
    kv_row(
        "objects",
        &format!(
            "{} ({} modules, {} functions)",
            record.objects.len(),
            modules,
            record.objects.len() - modules
        ),
    );

    section_mid("ANALYZER");
    kv_row("stem", &record.analyzer.stem.to_string());
    kv_row("stop words", &record.analyzer.stop_words.to_string());
    kv_row("min term len", &record.analyzer.min_term_len.to_string());

    section_mid("ENVIRONMENT");
    for (key, version) in &record.envversion {
        kv_row(key, &version.to_string());
    }
    let status = match record.check_env(&builtin_env_versions()) {
        Ok(()) => themed(GREEN, &[], "current"),
        Err(e) => themed(YELLOW, &[], &e.to_string()),
    };
    kv_row("status", &status);
    section_bot();

    Ok(())
}

fn cmd_search(file: &Path, text: &str, limit: usize) -> CliResult {
    let record = format::load(file)?;
    if let Err(e) = record.check_env(&builtin_env_versions()) {
        warn!(file = %file.display(), "{}", e);
    }

    section_top("SEARCH");
    kv_row("query", text);

    let results = match query(&record, text) {
        Ok(results) => results,
        Err(e) => {
            kv_row("results", "0");
            row(&format!(" {}", themed(YELLOW, &[], &e.hint())));
            section_bot();
            return Ok(());
        }
    };

    kv_row("results", &results.len().to_string());
    if let Some(object) = results.first_object() {
        let target = record.docname(object.doc_id).unwrap_or_default();
        kv_row(
            "object",
            &format!(
                "{} {} → {}#{}",
                kind_badge(object.kind),
                object.name,
                target,
                object.anchor
            ),
        );
    }

    if !results.is_empty() {
        section_mid("RESULTS");
        for (rank, hit) in results.iter().take(limit).enumerate() {
            row(&format!(
                " {}. {}  {}  {}",
                pad_left(&(rank + 1).to_string(), 3),
                score_value(hit.score),
                themed(BLUE, &[BOLD], hit.title),
                themed(GRAY, &[], hit.filename)
            ));
        }
        if results.len() > limit {
            row(&format!(
                " {}",
                themed(GRAY, &[], &format!("… {} more", results.len() - limit))
            ));
        }
    }
    section_bot();

    Ok(())
}
