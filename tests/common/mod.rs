//! Shared test documents for integration tests.

#![allow(dead_code)]

/// A single online reference, classified as `misc`.
pub const ONLINE_REFERENCE: &str =
    "MEC. Portal do Ministério. Disponível em: https://example.org/doc. Acesso em: 10 jan. 2024.";

/// Three references separated by a blank line, a whitespace-only line and
/// a double blank line.
///
/// Block types, in order: `book`, `phdthesis`, `misc`.
pub const SAMPLE_DOCUMENT: &str = "SILVA, João. O Livro. 2020.

   \t
SOUZA, M. Redes neurais. 2018. Tese de Doutorado – Universidade de São Paulo, São Paulo, 2018.


MEC. Portal do Ministério. Disponível em: https://example.org/doc. Acesso em: 10 jan. 2024.
";

/// Write `content` to `name` inside `dir` and return the full path.
pub fn write_input(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
