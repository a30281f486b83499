// End-to-end validation behavior: conformance failures are fatal, while a
// missing declaration source or type name only degrades to a warning.

use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tyson_core::error::ValidationError;
use tyson_core::{TysonCompiler, TysonError, TysonOptions, UnknownFieldPolicy};

fn interface_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("shapes.interface.ts");
    fs::write(
        &path,
        "export interface Point {\n  x: number;\n  y: number;\n  label?: string;\n}\n\nexport interface Flag {\n  enabled: boolean;\n}\n",
    )
    .unwrap();
    path
}

fn compiler_for(dir: &TempDir, type_name: &str) -> TysonCompiler {
    TysonCompiler::new(TysonOptions {
        interface_file: Some(interface_file(dir)),
        interface_name: Some(type_name.to_string()),
        ..Default::default()
    })
}

#[test]
fn test_conforming_document_passes() {
    let dir = TempDir::new().unwrap();
    let value = compiler_for(&dir, "Point")
        .parse_str("{ x: 1, y: 2, label: \"origin\" }", "point.tyson")
        .unwrap();
    assert_eq!(value, json!({ "x": 1, "y": 2, "label": "origin" }));
}

#[test]
fn test_optional_field_may_be_absent() {
    let dir = TempDir::new().unwrap();
    assert!(compiler_for(&dir, "Point")
        .parse_str("{ x: 1, y: 2 }", "point.tyson")
        .is_ok());
}

#[test]
fn test_missing_required_field_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = compiler_for(&dir, "Point")
        .parse_str("{ x: 1 }", "point.tyson")
        .unwrap_err();
    assert!(matches!(
        err,
        TysonError::Validation(ValidationError::MissingField { ref field, .. }) if field == "y"
    ));
}

#[test]
fn test_kind_mismatch_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = compiler_for(&dir, "Flag")
        .parse_str("{ enabled: \"yes\" }", "flag.tyson")
        .unwrap_err();
    assert!(matches!(
        err,
        TysonError::Validation(ValidationError::FieldTypeMismatch { .. })
    ));
}

#[test]
fn test_unknown_field_rejected_then_allowed() {
    let dir = TempDir::new().unwrap();
    let source = "{ enabled: true, extra: 1 }";

    let err = compiler_for(&dir, "Flag")
        .parse_str(source, "flag.tyson")
        .unwrap_err();
    assert!(matches!(
        err,
        TysonError::Validation(ValidationError::UnknownField { ref field, .. }) if field == "extra"
    ));

    let mut permissive = TysonCompiler::new(TysonOptions {
        interface_file: Some(interface_file(&dir)),
        interface_name: Some("Flag".to_string()),
        unknown_fields: UnknownFieldPolicy::Allow,
        ..Default::default()
    });
    assert!(permissive.parse_str(source, "flag.tyson").is_ok());
}

#[test]
fn test_header_tag_selects_the_type() {
    let dir = TempDir::new().unwrap();
    let mut compiler = TysonCompiler::new(TysonOptions {
        interface_file: Some(interface_file(&dir)),
        ..Default::default()
    });
    let err = compiler
        .parse_str("{: Flag\n  enabled: 1,\n}", "flag.tyson")
        .unwrap_err();
    assert!(matches!(err, TysonError::Validation(_)));
}

#[test]
fn test_unknown_type_name_degrades_to_warning() {
    let dir = TempDir::new().unwrap();
    // 'Nope' is not declared; parsing must still succeed
    assert!(compiler_for(&dir, "Nope")
        .parse_str("{ anything: 1 }", "any.tyson")
        .is_ok());
}

#[test]
fn test_unreadable_declaration_file_degrades_to_warning() {
    let mut compiler = TysonCompiler::new(TysonOptions {
        interface_file: Some(PathBuf::from("/nonexistent/shapes.d.ts")),
        interface_name: Some("Point".to_string()),
        ..Default::default()
    });
    assert!(compiler.parse_str("{ x: 1 }", "point.tyson").is_ok());
}

#[test]
fn test_type_name_without_declaration_source_skips_validation() {
    let mut compiler = TysonCompiler::new(TysonOptions {
        interface_name: Some("Point".to_string()),
        ..Default::default()
    });
    assert!(compiler.parse_str("{ x: \"not a number\" }", "point.tyson").is_ok());
}

#[test]
fn test_untyped_document_never_validated() {
    let mut compiler = TysonCompiler::new(TysonOptions::default());
    assert!(compiler.parse_str("{ whatever: [1, {}, null] }", "free.tyson").is_ok());
}

#[test]
fn test_validation_does_not_change_the_value() {
    let dir = TempDir::new().unwrap();
    let source = "{ x: 1, y: 2, label: \"origin\" }";
    let validated = compiler_for(&dir, "Point")
        .parse_str(source, "point.tyson")
        .unwrap();
    let unvalidated = TysonCompiler::new(TysonOptions::default())
        .parse_str(source, "point.tyson")
        .unwrap();
    assert_eq!(validated, unvalidated);
}
