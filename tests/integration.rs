//! Integration tests using TOML fixtures.
//!
//! This test harness loads reference blocks from TOML files in the
//! `fixtures/` directory and checks classification, extraction, citation
//! keys and per-style rendering against the expected values.

mod common;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use refbib::{
    classify, export_references, extract, format_reference, generate_citekey,
    process_references, process_references_with_mode, CitationStyle, ExportFormat,
    FormattedEntry, RecordMode,
};

/// A test fixture loaded from a TOML file.
#[derive(Debug, Deserialize)]
struct Fixture {
    /// Name of the test case
    name: String,
    /// Raw reference block
    block: String,
    #[serde(default)]
    expected_type: Option<String>,
    #[serde(default)]
    expected_author: Option<String>,
    #[serde(default)]
    expected_title: Option<String>,
    #[serde(default)]
    expected_year: Option<String>,
    #[serde(default)]
    expected_url: Option<String>,
    #[serde(default)]
    expected_accessed: Option<String>,
    #[serde(default)]
    expected_institution: Option<String>,
    #[serde(default)]
    expected_citekey: Option<String>,
    /// Expected rendering keyed by style name
    #[serde(default)]
    rendered: BTreeMap<String, String>,
}

/// Load all fixtures from a directory.
fn load_fixtures(dir: &Path) -> Vec<(String, Fixture)> {
    let mut fixtures = Vec::new();

    if !dir.exists() {
        return fixtures;
    }

    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().map_or(false, |e| e == "toml") {
            let content = fs::read_to_string(&path).unwrap();
            let fixture: Fixture = toml::from_str(&content).unwrap();
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            fixtures.push((name, fixture));
        }
    }

    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    fixtures
}

fn check(name: &str, field: &str, expected: &Option<String>, actual: &str) {
    if let Some(expected) = expected {
        assert_eq!(
            actual, expected,
            "Test '{}' failed: {} mismatch",
            name, field
        );
    }
}

/// Verify classification, extraction and citation key of one fixture.
fn run_reference_test(name: &str, fixture: &Fixture) {
    let ref_type = classify(&fixture.block);
    let fields = extract(&fixture.block);

    check(name, "type", &fixture.expected_type, ref_type.as_str());
    check(name, "author", &fixture.expected_author, &fields.author);
    check(name, "title", &fixture.expected_title, &fields.title);
    check(name, "year", &fixture.expected_year, &fields.year);
    check(name, "url", &fixture.expected_url, &fields.url);
    check(name, "accessed", &fixture.expected_accessed, &fields.accessed);
    check(
        name,
        "institution",
        &fixture.expected_institution,
        &fields.institution,
    );
    check(
        name,
        "citekey",
        &fixture.expected_citekey,
        &generate_citekey(Some(&fields.author), &fields.year),
    );

    for (style_name, expected) in &fixture.rendered {
        let style = CitationStyle::from_name(style_name);
        let actual = format_reference(&fields, ref_type, &style);
        assert_eq!(
            &actual, expected,
            "Test '{}' failed: {} rendering mismatch",
            name, style_name
        );
    }
}

#[test]
fn test_reference_fixtures() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/references");
    let fixtures = load_fixtures(&fixtures_dir);
    assert!(!fixtures.is_empty(), "no fixtures found in {:?}", fixtures_dir);

    for (name, fixture) in fixtures {
        println!("Running reference test: {}", fixture.name);
        run_reference_test(&name, &fixture);
    }
}

#[test]
fn test_fixture_blocks_processed_as_one_document() {
    // Given: every fixture block joined into a single pasted list
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/references");
    let fixtures = load_fixtures(&fixtures_dir);
    let document = fixtures
        .iter()
        .map(|(_, f)| f.block.as_str())
        .collect::<Vec<_>>()
        .join("\n\n  \n");

    // When: we process it with the custom style
    let entries = process_references(&document, &CitationStyle::Custom, &ExportFormat::Txt);

    // Then: there is one entry per fixture, in order, tagged with its type
    assert_eq!(entries.len(), fixtures.len());
    for ((name, fixture), entry) in fixtures.iter().zip(&entries) {
        let FormattedEntry::Text(text) = entry else {
            panic!("expected text entry for {}", name);
        };
        if let Some(ty) = &fixture.expected_type {
            assert!(text.ends_with(&format!("[{}]", ty)), "{}: {}", name, text);
        }
    }
}

#[test]
fn test_apa_scenario() {
    // Given: the plain book scenario
    let block = "SILVA, João. O Livro. 2020.";
    let fields = extract(block);

    // When: rendered as APA
    let apa = format_reference(&fields, classify(block), &CitationStyle::Apa);

    // Then: the rendering follows "{author} ({year}). {title}."
    assert_eq!(apa, format!("{} (2020). {}.", fields.author, fields.title));
    assert!(apa.starts_with("Silva, J"));
}

#[test]
fn test_bibtex_online_scenario_is_balanced() {
    let entries = process_references(common::ONLINE_REFERENCE, &CitationStyle::Bibtex, &ExportFormat::Bib);
    let FormattedEntry::Text(entry) = &entries[0] else {
        panic!("expected text entry");
    };

    assert!(entry.starts_with("@misc{"));
    assert!(entry.contains("url       = {https://example.org/doc.}"));
    assert!(entry.contains("note      = {Acesso em: 10 jan. 2024.}"));

    let mut depth = 0i32;
    for c in entry.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        assert!(depth >= 0, "closing brace before opening in {}", entry);
    }
    assert_eq!(depth, 0, "unbalanced braces in {}", entry);
    assert!(entry.ends_with("\n}"));
}

#[test]
fn test_json_export_round_trip() {
    // Given: a processed document kept as records
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("refs.txt");
    let entries = process_references(common::SAMPLE_DOCUMENT, &CitationStyle::Abnt, &ExportFormat::Json);

    // When: exported to JSON and read back
    let path = export_references(&entries, &base, &CitationStyle::Abnt, &ExportFormat::Json).unwrap();
    let parsed: Vec<FormattedEntry> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    // Then: the collection is equal field for field
    assert_eq!(path, dir.path().join("refsabnt.json"));
    assert_eq!(parsed, entries);
}

#[test]
fn test_legacy_json_records_have_no_type() {
    let entries = process_references(common::SAMPLE_DOCUMENT, &CitationStyle::Bibtex, &ExportFormat::Json);
    let value = serde_json::to_value(&entries).unwrap();

    for record in value.as_array().unwrap() {
        let object = record.as_object().unwrap();
        assert!(object.get("type").is_none(), "type leaked into {}", record);
        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["accessed", "author", "institution", "title", "url", "year"]
        );
    }
}

#[test]
fn test_typed_yaml_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("refs.txt");
    let entries = process_references_with_mode(
        common::SAMPLE_DOCUMENT,
        &CitationStyle::Apa,
        &ExportFormat::Yaml,
        RecordMode::Typed,
    );

    let path = export_references(&entries, &base, &CitationStyle::Apa, &ExportFormat::Yaml).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    let parsed: Vec<FormattedEntry> = serde_yaml::from_str(&contents).unwrap();

    assert!(contents.contains("type: phdthesis"), "got:\n{}", contents);
    assert!(contents.contains("São Paulo"), "got:\n{}", contents);
    assert_eq!(parsed, entries);
}
