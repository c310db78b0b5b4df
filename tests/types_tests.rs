// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use sql_snippet_vault::{
    analyzer::{Complexity, QueryType, RuleCategory, Severity, ValidationResult, validate},
    record::{QueryRecord, Visibility}
};

#[test]
fn test_severity_display_suggestion() {
    assert_eq!(format!("{}", Severity::Suggestion), "HINT");
}

#[test]
fn test_severity_display_warning() {
    assert_eq!(format!("{}", Severity::Warning), "WARN");
}

#[test]
fn test_severity_display_error() {
    assert_eq!(format!("{}", Severity::Error), "ERROR");
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Suggestion < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Suggestion < Severity::Error);
}

#[test]
fn test_rule_category_display() {
    assert_eq!(RuleCategory::Syntax.to_string(), "Syntax");
    assert_eq!(RuleCategory::Security.to_string(), "Security");
}

#[test]
fn test_query_type_display_and_serde() {
    assert_eq!(QueryType::Select.to_string(), "SELECT");
    assert_eq!(QueryType::Unknown.to_string(), "UNKNOWN");
    assert_eq!(serde_json::to_string(&QueryType::Alter).unwrap(), "\"ALTER\"");
    let parsed: QueryType = serde_json::from_str("\"DROP\"").unwrap();
    assert_eq!(parsed, QueryType::Drop);
}

#[test]
fn test_complexity_ordering_and_serde() {
    assert!(Complexity::Low < Complexity::Medium);
    assert!(Complexity::Medium < Complexity::High);
    assert_eq!(serde_json::to_string(&Complexity::Medium).unwrap(), "\"MEDIUM\"");
}

#[test]
fn test_validation_result_json_shape() {
    let value = serde_json::to_value(ValidationResult::empty_input()).unwrap();
    assert_eq!(value["isValid"], false);
    assert_eq!(value["errors"][0], "SQL query cannot be empty");
    assert_eq!(value["queryType"], "UNKNOWN");
    assert_eq!(value["estimatedComplexity"], "LOW");
    assert!(value["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_worst_severity() {
    assert_eq!(
        ValidationResult::empty_input().worst_severity(),
        Some(Severity::Error)
    );
    assert_eq!(validate("DELETE FROM t").worst_severity(), Some(Severity::Warning));
    assert_eq!(validate("SELECT id FROM t LIMIT 1;").worst_severity(), None);
}

#[test]
fn test_record_defaults_when_deserializing() {
    let record: QueryRecord = serde_json::from_str(r#"{"id": 7, "sql": "SELECT 1;"}"#).unwrap();
    assert_eq!(record.current_version, 1);
    assert_eq!(record.visibility, Visibility::Private);
    assert!(record.versions.is_empty());
    assert_eq!(record.display_name(), "Query 7");
}

#[test]
fn test_visibility_serde() {
    assert_eq!(serde_json::to_string(&Visibility::Public).unwrap(), "\"public\"");
    let parsed: Visibility = serde_json::from_str("\"private\"").unwrap();
    assert_eq!(parsed, Visibility::Private);
}
