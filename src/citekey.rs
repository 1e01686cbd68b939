//! Citation key generation.

use std::sync::LazyLock;

use regex::Regex;

static NAME_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-zÀ-ÿ]+").expect("valid name regex"));

/// Derives a citation key of the form `<surname><year>`.
///
/// When the author contains a comma only the part before the first comma is
/// considered. In both cases the last alphabetic word of that part is used,
/// lowercased. A missing author, or one without any letters, yields
/// `anon<year>`. No collision handling is done.
///
/// # Examples
///
/// ```
/// use refbib::generate_citekey;
///
/// assert_eq!(generate_citekey(Some("Borges, Jorge Luis"), "2023"), "borges2023");
/// assert_eq!(generate_citekey(Some("Jorge Luis Borges"), "2023"), "borges2023");
/// assert_eq!(generate_citekey(None, "2023"), "anon2023");
/// ```
pub fn generate_citekey(author: Option<&str>, year: &str) -> String {
    let author = match author {
        Some(a) if !a.is_empty() => a.trim(),
        _ => return format!("anon{year}"),
    };

    let surname_part = match author.split_once(',') {
        Some((before, _)) => before,
        None => author,
    };

    match NAME_WORD_RE.find_iter(surname_part).last() {
        Some(word) => format!("{}{year}", word.as_str().to_lowercase()),
        None => format!("anon{year}"),
    }
}
