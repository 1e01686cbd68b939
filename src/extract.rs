//! Field extraction from raw reference blocks.
//!
//! Every field is matched independently against the same block. A field
//! that cannot be found falls back to a placeholder, so an [`ExtractedFields`]
//! record is always fully populated.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder used when no author run starts the block.
pub const UNKNOWN_AUTHOR: &str = "Autor Desconhecido";
/// Placeholder used when no title can be delimited.
pub const UNKNOWN_TITLE: &str = "Título Desconhecido";
/// Placeholder used when no 19xx/20xx year is present.
pub const UNKNOWN_YEAR: &str = "0000";

static AUTHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z\s,.]+)").expect("valid author regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".\s*(.+?).\s").expect("valid title regex"));
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19|20)\d{2}\b").expect("valid year regex"));
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"dispon[ií]vel em:\s*(https?://\S+)").expect("valid url regex")
});
static ACCESSED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"acess[oa] em:\s*([^\n]+)").expect("valid access regex"));
static INSTITUTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(universidade|instituto|faculdade)\s+[a-zà-ú\s]+")
        .expect("valid institution regex")
});

/// Bibliographic fields extracted from one reference block.
///
/// The field names are also the keys of exported JSON/YAML records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub author: String,
    pub title: String,
    /// Four digits, or `"0000"` when no year was found.
    pub year: String,
    /// Lowercased URL following "Disponível em:", or empty.
    pub url: String,
    /// Access date following "Acesso em:", or empty.
    pub accessed: String,
    /// Title-cased institution name, or empty.
    pub institution: String,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            author: UNKNOWN_AUTHOR.to_string(),
            title: UNKNOWN_TITLE.to_string(),
            year: UNKNOWN_YEAR.to_string(),
            url: String::new(),
            accessed: String::new(),
            institution: String::new(),
        }
    }
}

/// Extracts author, title, year, URL, access date and institution.
///
/// Never fails: fields that do not match take their documented default.
///
/// # Examples
///
/// ```
/// use refbib::extract;
///
/// let fields = extract("SILVA, João. O Livro. 2020.");
/// assert_eq!(fields.year, "2020");
/// assert_eq!(fields.url, "");
/// ```
pub fn extract(block: &str) -> ExtractedFields {
    let lower = block.to_lowercase();
    let mut fields = ExtractedFields::default();

    if let Some(cap) = AUTHOR_RE.captures(block) {
        fields.author = title_case(cap[1].trim());
    }
    if let Some(cap) = TITLE_RE.captures(block) {
        fields.title = cap[1].trim().to_string();
    }
    if let Some(m) = YEAR_RE.find(block) {
        fields.year = m.as_str().to_string();
    }
    if let Some(cap) = URL_RE.captures(&lower) {
        fields.url = cap[1].to_string();
    }
    if let Some(cap) = ACCESSED_RE.captures(&lower) {
        fields.accessed = capitalize(cap[1].trim());
    }
    if let Some(m) = INSTITUTION_RE.find(&lower) {
        fields.institution = title_case(m.as_str());
    }

    fields
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Upper-cases every letter that follows a non-letter and lower-cases the rest.
///
/// ```
/// assert_eq!(refbib::extract::title_case("DE SOUZA, f. o'neil"), "De Souza, F. O'Neil");
/// ```
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        if is_cased(c) {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
