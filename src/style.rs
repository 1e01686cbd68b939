//! Citation styles and reference rendering.
//!
//! Renders an [`ExtractedFields`] record as BibTeX, ABNT, APA or a compact
//! custom line. Rendering never fails: an unknown style produces a
//! diagnostic string instead.

use std::fmt;

use crate::citekey::generate_citekey;
use crate::classify::ReferenceType;
use crate::extract::ExtractedFields;

/// A citation style selected by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CitationStyle {
    #[default]
    Bibtex,
    Abnt,
    Apa,
    Custom,
    /// A name that is not one of the builtin styles.
    Unknown(String),
}

/// Names of the builtin styles, in menu order.
const BUILTIN_STYLES: &[&str] = &["bibtex", "abnt", "apa", "custom"];

impl CitationStyle {
    /// Resolves a style name. Names that are not builtin become [`CitationStyle::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "bibtex" => CitationStyle::Bibtex,
            "abnt" => CitationStyle::Abnt,
            "apa" => CitationStyle::Apa,
            "custom" => CitationStyle::Custom,
            other => CitationStyle::Unknown(other.to_string()),
        }
    }

    /// The style name, as used in output file names.
    pub fn name(&self) -> &str {
        match self {
            CitationStyle::Bibtex => "bibtex",
            CitationStyle::Abnt => "abnt",
            CitationStyle::Apa => "apa",
            CitationStyle::Custom => "custom",
            CitationStyle::Unknown(name) => name,
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the list of builtin style names.
pub fn builtin_style_names() -> Vec<&'static str> {
    BUILTIN_STYLES.to_vec()
}

/// Renders one reference in the given style.
///
/// # Arguments
///
/// * `fields` - The extracted fields of the reference
/// * `ref_type` - The entry type assigned by [`crate::classify`]
/// * `style` - The target citation style
///
/// # Returns
///
/// The formatted reference. For [`CitationStyle::Unknown`] this is
/// `"Formato desconhecido: <name>"`.
pub fn format_reference(
    fields: &ExtractedFields,
    ref_type: ReferenceType,
    style: &CitationStyle,
) -> String {
    match style {
        CitationStyle::Bibtex => format_bibtex(fields, ref_type),
        CitationStyle::Abnt => format_abnt(fields, ref_type),
        CitationStyle::Apa => format_apa(fields),
        CitationStyle::Custom => format!(
            "[{}] {} - {} [{}]",
            fields.year, fields.author, fields.title, ref_type
        ),
        CitationStyle::Unknown(name) => {
            tracing::warn!(style = %name, "unknown citation style");
            format!("Formato desconhecido: {}", name)
        }
    }
}

fn format_bibtex(fields: &ExtractedFields, ref_type: ReferenceType) -> String {
    let citekey = generate_citekey(Some(&fields.author), &fields.year);

    let mut entry = format!("@{}{{{},\n", ref_type, citekey);
    entry.push_str(&format!("  author    = {{{}}},\n", fields.author));
    entry.push_str(&format!("  title     = {{{}}},\n", fields.title));
    entry.push_str(&format!("  year      = {{{}}},\n", fields.year));
    if ref_type == ReferenceType::Misc && !fields.url.is_empty() {
        entry.push_str(&format!("  url       = {{{}}},\n", fields.url));
        entry.push_str(&format!("  note      = {{Acesso em: {}}},\n", fields.accessed));
    }
    if ref_type.is_thesis() && !fields.institution.is_empty() {
        entry.push_str(&format!("  school    = {{{}}},\n", fields.institution));
    }

    let mut entry = entry.trim_end_matches([',', '\n']).to_string();
    entry.push_str("\n}");
    entry
}

fn format_abnt(fields: &ExtractedFields, ref_type: ReferenceType) -> String {
    let mut result = format!("{}. {}. ", fields.author.to_uppercase(), fields.title);
    match ref_type {
        ReferenceType::PhdThesis => result.push_str(&format!(
            "Tese (Doutorado) – {}, {}.",
            fields.institution, fields.year
        )),
        ReferenceType::MastersThesis => result.push_str(&format!(
            "Dissertação (Mestrado) – {}, {}.",
            fields.institution, fields.year
        )),
        ReferenceType::Misc if !fields.url.is_empty() => result.push_str(&format!(
            "Disponível em: {}. Acesso em: {}.",
            fields.url, fields.accessed
        )),
        _ => result.push_str(&format!("{}.", fields.year)),
    }
    result
}

fn format_apa(fields: &ExtractedFields) -> String {
    if fields.url.is_empty() {
        format!("{} ({}). {}.", fields.author, fields.year, fields.title)
    } else {
        format!(
            "{} ({}). {}. Retrieved from {}",
            fields.author, fields.year, fields.title, fields.url
        )
    }
}
