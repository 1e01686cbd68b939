//! Export of processed references.
//!
//! This module derives the output file path from the input path and
//! serializes the processed entries as plain text, JSON or YAML.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::processor::FormattedEntry;
use crate::style::CitationStyle;

/// Errors that can occur when exporting references.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("serialized output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// An export format selected by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Txt,
    Bib,
    Json,
    Yaml,
    /// A name that is not one of the supported formats.
    Unknown(String),
}

/// Names of the supported formats.
const FORMATS: &[&str] = &["txt", "json", "yaml", "bib"];

impl ExportFormat {
    /// Resolves a format name. Unsupported names become [`ExportFormat::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "txt" => ExportFormat::Txt,
            "bib" => ExportFormat::Bib,
            "json" => ExportFormat::Json,
            "yaml" => ExportFormat::Yaml,
            other => ExportFormat::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Bib => "bib",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Unknown(name) => name,
        }
    }

    /// Whether entries are exported as rendered strings rather than records.
    pub fn is_text(&self) -> bool {
        matches!(self, ExportFormat::Txt | ExportFormat::Bib)
    }

    /// The string that replaces the input file's extension.
    ///
    /// `bib` ignores the style; unknown formats fall back to `{style}.txt`.
    pub fn file_suffix(&self, style: &CitationStyle) -> String {
        match self {
            ExportFormat::Bib => ".bib".to_string(),
            ExportFormat::Json => format!("{}.json", style.name()),
            ExportFormat::Yaml => format!("{}.yaml", style.name()),
            ExportFormat::Txt | ExportFormat::Unknown(_) => format!("{}.txt", style.name()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the list of supported export format names.
pub fn format_names() -> Vec<&'static str> {
    FORMATS.to_vec()
}

/// Derives the export path by replacing the extension of `base`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use refbib::{output_path, CitationStyle, ExportFormat};
///
/// let path = output_path(Path::new("refs.txt"), &CitationStyle::Apa, &ExportFormat::Json);
/// assert_eq!(path, PathBuf::from("refsapa.json"));
/// ```
pub fn output_path(base: &Path, style: &CitationStyle, format: &ExportFormat) -> PathBuf {
    let suffix = format.file_suffix(style);
    let stem = match base.extension() {
        Some(_) => base.with_extension(""),
        None => base.to_path_buf(),
    };
    let mut name = stem.into_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Serializes entries into the file contents for `format`.
///
/// Text formats join entries with a blank line. JSON is indented with four
/// spaces and keeps field order; YAML sorts record keys. Both keep non-ASCII
/// characters as-is. Unknown formats produce empty contents.
pub fn serialize_entries(
    entries: &[FormattedEntry],
    format: &ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Txt | ExportFormat::Bib => {
            let texts = entries
                .iter()
                .map(|entry| match entry {
                    FormattedEntry::Text(text) => Ok(text.clone()),
                    record => serde_json::to_string(record),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(texts.join("\n\n"))
        }
        ExportFormat::Json => {
            let mut buf = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            entries.serialize(&mut ser)?;
            Ok(String::from_utf8(buf)?)
        }
        ExportFormat::Yaml => {
            // Record keys are emitted in sorted order, as earlier exports were.
            let sorted = serde_json::to_value(entries)?;
            Ok(serde_yaml::to_string(&sorted)?)
        }
        ExportFormat::Unknown(name) => {
            tracing::warn!(format = %name, "unknown export format, writing empty file");
            Ok(String::new())
        }
    }
}

/// Writes the entries next to `base` and returns the written path.
///
/// An existing file at the destination is overwritten.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn export_references(
    entries: &[FormattedEntry],
    base: &Path,
    style: &CitationStyle,
    format: &ExportFormat,
) -> Result<PathBuf, ExportError> {
    let path = output_path(base, style, format);
    let contents = serialize_entries(entries, format)?;

    fs::write(&path, contents).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), entries = entries.len(), %format, "exported references");
    Ok(path)
}
