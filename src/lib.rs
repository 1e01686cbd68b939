//! refbib: extract bibliographic references from plain text and export them
//! as formatted citations.
//!
//! This library provides functionality to:
//! - Split a pasted reference list into blank-line separated blocks
//! - Classify each block into a BibTeX entry type
//! - Extract author, title, year, URL, access date and institution
//! - Render references as BibTeX, ABNT, APA or a custom one-line style
//! - Export the results as text, BibTeX, JSON or YAML

pub mod citekey;
pub mod classify;
pub mod config;
pub mod extract;
pub mod output;
pub mod processor;
pub mod style;

pub use citekey::generate_citekey;
pub use classify::{classify, ReferenceType};
pub use config::{ConfigError, ConfigProvider, InteractivePrompt, RunConfig};
pub use extract::{extract, ExtractedFields};
pub use output::{export_references, output_path, serialize_entries, ExportError, ExportFormat};
pub use processor::{
    process_references, process_references_with_mode, run, split_blocks, FormattedEntry,
    RecordMode, RunError, RunSummary, TypedRecord,
};
pub use style::{builtin_style_names, format_reference, CitationStyle};
