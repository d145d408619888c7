use std::io::Write;

use triage_catalog::error::CatalogError;
use triage_catalog::{CATALOG_VERSION, ModelCatalog};

#[test]
fn bare_list_preserves_load_order() {
    let json = br#"[
        {"name": "stroke", "parameters": ["age", "bmi"], "tool": "stroke_tool"},
        {"name": "cardio", "parameters": ["age", "ap_hi"], "tool": "cardio_tool"},
        {"name": "anemia", "parameters": ["hb"], "tool": "anemia_tool"}
    ]"#;

    let catalog = ModelCatalog::from_slice(json).unwrap();
    let names: Vec<_> = catalog.all().iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, ["stroke", "cardio", "anemia"]);
    assert_eq!(catalog.lookup("cardio").unwrap().backend_tool, "cardio_tool");
    assert!(catalog.lookup("missing").is_none());
}

#[test]
fn versioned_document_is_accepted() {
    let json = br#"{"version": 1, "models": [
        {"name": "cardio", "parameters": ["age"], "tool": "t", "description": "CVD"}
    ]}"#;

    let catalog = ModelCatalog::from_slice(json).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.all()[0].description.as_deref(), Some("CVD"));
}

#[test]
fn newer_version_is_rejected() {
    let json = format!(
        r#"{{"version": {}, "models": [{{"name": "a", "parameters": ["x"], "tool": "t"}}]}}"#,
        CATALOG_VERSION + 1
    );
    let err = ModelCatalog::from_slice(json.as_bytes()).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedVersion { .. }));
}

#[test]
fn duplicate_model_name_is_rejected() {
    let json = br#"[
        {"name": "cardio", "parameters": ["age"], "tool": "a"},
        {"name": "cardio", "parameters": ["bmi"], "tool": "b"}
    ]"#;
    let err = ModelCatalog::from_slice(json).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateModel(name) if name == "cardio"));
}

#[test]
fn empty_parameter_list_is_rejected() {
    let json = br#"[{"name": "cardio", "parameters": [], "tool": "a"}]"#;
    let err = ModelCatalog::from_slice(json).unwrap_err();
    assert!(matches!(err, CatalogError::EmptyParameters(_)));
}

#[test]
fn repeated_parameter_is_rejected() {
    let json = br#"[{"name": "cardio", "parameters": ["age", "age"], "tool": "a"}]"#;
    let err = ModelCatalog::from_slice(json).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateParameter { .. }));
}

#[test]
fn malformed_json_and_empty_catalog_are_rejected() {
    assert!(matches!(
        ModelCatalog::from_slice(b"{not json").unwrap_err(),
        CatalogError::Parse(_)
    ));
    assert!(matches!(
        ModelCatalog::from_slice(b"[]").unwrap_err(),
        CatalogError::Empty
    ));
}

#[test]
fn load_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"name": "cardio", "parameters": ["age"], "tool": "a"}]"#)
        .unwrap();

    let catalog = ModelCatalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn unreadable_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModelCatalog::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}

#[test]
fn builtin_catalog_is_valid() {
    let catalog = ModelCatalog::builtin().unwrap();
    let cardio = catalog.lookup("cardiovascular_risk").unwrap();
    assert_eq!(cardio.required_parameters.len(), 11);
    assert_eq!(catalog.all()[0].name, "cardiovascular_risk");
}

#[test]
fn parameter_names_are_deduplicated_in_catalog_order() {
    let json = br#"[
        {"name": "a", "parameters": ["age", "bmi"], "tool": "t"},
        {"name": "b", "parameters": ["bmi", "glucose", "age"], "tool": "t"}
    ]"#;
    let catalog = ModelCatalog::from_slice(json).unwrap();
    assert_eq!(catalog.parameter_names(), ["age", "bmi", "glucose"]);
}
