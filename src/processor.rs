//! Batch processing of reference documents.
//!
//! Splits a document into reference blocks, runs each block through
//! classification, extraction and formatting, and collects the results in
//! input order. [`run`] wires this to the input file and the exporter.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::citekey::generate_citekey;
use crate::classify::{classify, ReferenceType};
use crate::config::RunConfig;
use crate::extract::{extract, ExtractedFields};
use crate::output::{export_references, ExportError, ExportFormat};
use crate::style::{format_reference, CitationStyle};

static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid block separator regex"));

/// Errors that can occur while running the full pipeline.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("failed to read input '{path}': {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// How structured exports represent each reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordMode {
    /// Bare extracted fields; the entry type is dropped. Matches files
    /// written by earlier releases.
    #[default]
    Legacy,
    /// Extracted fields plus the entry type and citation key.
    Typed,
}

/// Extracted fields tagged with their entry type and citation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedRecord {
    #[serde(rename = "type")]
    pub ref_type: ReferenceType,
    pub citekey: String,
    #[serde(flatten)]
    pub fields: ExtractedFields,
}

/// One processed reference.
///
/// Text formats receive rendered strings; structured formats receive records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattedEntry {
    Text(String),
    Typed(TypedRecord),
    Record(ExtractedFields),
}

/// Outcome of a successful [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub entries: usize,
}

/// Splits a document into reference blocks.
///
/// Blocks are separated by one or more blank lines; whitespace-only lines
/// count as blank. Blocks that are empty once trimmed are dropped. Surviving
/// blocks are returned untrimmed, in document order.
pub fn split_blocks(document: &str) -> Vec<&str> {
    BLANK_LINES_RE
        .split(document.trim())
        .filter(|block| !block.trim().is_empty())
        .collect()
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Processes every reference block of a document, dropping entry types
/// from structured records.
///
/// # Examples
///
/// ```
/// use refbib::{process_references, CitationStyle, ExportFormat, FormattedEntry};
///
/// let entries = process_references(
///     "SILVA, João. O Livro. 2020.\n\nSOUZA, M. Outro. 2019.",
///     &CitationStyle::Custom,
///     &ExportFormat::Txt,
/// );
/// assert_eq!(entries.len(), 2);
/// assert!(matches!(entries[0], FormattedEntry::Text(_)));
/// ```
pub fn process_references(
    document: &str,
    style: &CitationStyle,
    format: &ExportFormat,
) -> Vec<FormattedEntry> {
    process_references_with_mode(document, style, format, RecordMode::Legacy)
}

/// Processes every reference block of a document.
///
/// Text formats (`txt`, `bib`) get one rendered string per block. All other
/// formats get a record, shaped by `mode`.
pub fn process_references_with_mode(
    document: &str,
    style: &CitationStyle,
    format: &ExportFormat,
    mode: RecordMode,
) -> Vec<FormattedEntry> {
    split_blocks(document)
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let ref_type = classify(block);
            let fields = extract(block);
            tracing::debug!(
                block = index,
                %ref_type,
                citekey = %generate_citekey(Some(&fields.author), &fields.year),
                "classified reference"
            );

            if format.is_text() {
                FormattedEntry::Text(format_reference(&fields, ref_type, style))
            } else {
                match mode {
                    RecordMode::Legacy => FormattedEntry::Record(fields),
                    RecordMode::Typed => FormattedEntry::Typed(TypedRecord {
                        ref_type,
                        citekey: generate_citekey(Some(&fields.author), &fields.year),
                        fields,
                    }),
                }
            }
        })
        .collect()
}

/// Reads the configured input file, processes it and writes the export.
///
/// Line endings are normalized to `\n` before processing.
///
/// # Errors
///
/// Returns [`RunError::Input`] if the input cannot be read as UTF-8 text,
/// and [`RunError::Export`] if the output cannot be written.
pub fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    let raw = fs::read_to_string(&config.input).map_err(|source| RunError::Input {
        path: config.input.clone(),
        source,
    })?;
    let document = normalize_newlines(&raw);

    let entries =
        process_references_with_mode(&document, &config.style, &config.format, config.mode);
    let output_path = export_references(&entries, &config.input, &config.style, &config.format)?;

    Ok(RunSummary {
        output_path,
        entries: entries.len(),
    })
}
