//! Configuration files driving vocabulary loading, schema.org checks and
//! registry overrides.

use std::path::Path;

use serde_json::json;

use sdval_cli::config::ValidatorConfig;
use sdval_cli::validate::{exit_code, validate_document};

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn fixture(dir: &Path) {
    let vocabulary = json!({"@graph": [
        {"@id": "schema:Thing", "@type": "rdfs:Class"},
        {"@id": "schema:CreativeWork", "@type": "rdfs:Class",
         "rdfs:subClassOf": {"@id": "schema:Thing"}},
        {"@id": "schema:Article", "@type": "rdfs:Class",
         "rdfs:subClassOf": {"@id": "schema:CreativeWork"}},
        {"@id": "schema:TechArticle", "@type": "rdfs:Class",
         "rdfs:subClassOf": {"@id": "schema:Article"}},
        {"@id": "schema:name", "@type": "rdf:Property",
         "schema:domainIncludes": {"@id": "schema:Thing"}},
        {"@id": "schema:headline", "@type": "rdf:Property",
         "schema:domainIncludes": {"@id": "schema:CreativeWork"}}
    ]});
    write(dir, "vocab.jsonld", &vocabulary.to_string());
    let document = json!({"jsonld": {"TechArticle": [
        {"@type": "TechArticle", "headline": "Rust", "mood": "calm"}
    ]}});
    write(dir, "page.json", &document.to_string());
}

#[test]
fn vocabulary_from_config_enables_inheritance_and_conformance() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());
    let config_path = write(dir.path(), "sdval.yaml", "vocabulary: vocab.jsonld\n");

    let config = ValidatorConfig::load(Some(&config_path)).unwrap();
    let issues = validate_document(&config, &dir.path().join("page.json")).unwrap();

    let fields: Vec<&str> = issues.iter().map(|i| i.field_names[0].as_str()).collect();
    assert_eq!(
        fields,
        vec!["author", "dateModified", "datePublished", "image", "publisher", "mood"]
    );
    assert_eq!(issues[5].error_type.as_deref(), Some("schemaOrg"));
    assert_eq!(exit_code(&issues, false), 0);
    assert_eq!(exit_code(&issues, true), 2);
}

#[test]
fn conformance_checks_can_be_switched_off() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());
    let config_path = write(
        dir.path(),
        "sdval.yaml",
        "vocabulary: vocab.jsonld\nschema_org_checks: false\n",
    );

    let config = ValidatorConfig::load(Some(&config_path)).unwrap();
    let issues = validate_document(&config, &dir.path().join("page.json")).unwrap();
    assert_eq!(issues.len(), 5);
    assert!(issues.iter().all(|i| i.error_type.is_none()));
}

#[test]
fn disabling_the_ancestor_disables_the_subtype() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());
    let config_path = write(
        dir.path(),
        "sdval.yaml",
        "vocabulary: vocab.jsonld\ndisabled_types: [Article]\n",
    );

    let config = ValidatorConfig::load(Some(&config_path)).unwrap();
    let issues = validate_document(&config, &dir.path().join("page.json")).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field_names, vec!["mood"]);
}

#[test]
fn malformed_yaml_is_reported_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(dir.path(), "sdval.yaml", "disabled_types: [Event\n");
    let err = ValidatorConfig::load(Some(&config_path)).unwrap_err();
    assert!(format!("{err:#}").contains("sdval.yaml"));
}
