//! Reference type detection.
//!
//! Assigns one BibTeX entry type to a raw reference block using keyword
//! heuristics. The first matching rule wins.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Volume marker such as "v. 12". The dot matches any character.
static VOLUME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v.\s*\d+").expect("valid volume regex"));

/// The closed set of entry types a reference block can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    Misc,
    PhdThesis,
    MastersThesis,
    InProceedings,
    Article,
    TechReport,
    InCollection,
    Book,
}

impl ReferenceType {
    /// Every type, in classification priority order.
    pub const ALL: [ReferenceType; 8] = [
        ReferenceType::Misc,
        ReferenceType::PhdThesis,
        ReferenceType::MastersThesis,
        ReferenceType::InProceedings,
        ReferenceType::Article,
        ReferenceType::TechReport,
        ReferenceType::InCollection,
        ReferenceType::Book,
    ];

    /// The lowercase BibTeX tag, e.g. `phdthesis`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::Misc => "misc",
            ReferenceType::PhdThesis => "phdthesis",
            ReferenceType::MastersThesis => "mastersthesis",
            ReferenceType::InProceedings => "inproceedings",
            ReferenceType::Article => "article",
            ReferenceType::TechReport => "techreport",
            ReferenceType::InCollection => "incollection",
            ReferenceType::Book => "book",
        }
    }

    pub fn is_thesis(&self) -> bool {
        matches!(self, ReferenceType::PhdThesis | ReferenceType::MastersThesis)
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a raw reference block.
///
/// Matching is case-insensitive and ordered:
///
/// 1. "disponível em:" → `misc`
/// 2. "tese de doutorado" → `phdthesis`
/// 3. "dissertação de mestrado" → `mastersthesis`
/// 4. "anais" or "congresso" → `inproceedings`
/// 5. "revista" or a volume marker → `article`
/// 6. "rfc" → `techreport`
/// 7. "in:" → `incollection`
/// 8. anything else → `book`
///
/// # Examples
///
/// ```
/// use refbib::{classify, ReferenceType};
///
/// assert_eq!(classify("SILVA, J. Tese de Doutorado. USP, 2019."), ReferenceType::PhdThesis);
/// assert_eq!(classify("SILVA, João. O Livro. 2020."), ReferenceType::Book);
/// ```
pub fn classify(block: &str) -> ReferenceType {
    let lower = block.to_lowercase();

    if lower.contains("disponível em:") {
        ReferenceType::Misc
    } else if lower.contains("tese de doutorado") {
        ReferenceType::PhdThesis
    } else if lower.contains("dissertação de mestrado") {
        ReferenceType::MastersThesis
    } else if lower.contains("anais") || lower.contains("congresso") {
        ReferenceType::InProceedings
    } else if lower.contains("revista") || VOLUME_RE.is_match(&lower) {
        ReferenceType::Article
    } else if lower.contains("rfc") {
        ReferenceType::TechReport
    } else if lower.contains("in:") {
        ReferenceType::InCollection
    } else {
        ReferenceType::Book
    }
}
