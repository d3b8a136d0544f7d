// Rust guideline compliant 2026-02-06

//! Unit tests for error types and messages.

use boardtrace_core::{Config, Error, Stage};

#[test]
fn test_io_error_formatting() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = Error::Io(io_err);
    let msg = error.to_string();
    assert!(
        msg.contains("IO error"),
        "IO error should contain 'IO error' prefix"
    );
}

#[test]
fn test_json_error_formatting() {
    let json_err = serde_json::from_str::<serde_json::Value>("invalid json")
        .expect_err("Should fail to parse invalid JSON");
    let error = Error::Json(json_err);
    assert!(error.to_string().starts_with("JSON error: "));
}

#[test]
fn test_toml_error_comes_from_config_parse() {
    let error = Config::from_toml_str("fuzzy_matching = \"maybe\"")
        .expect_err("String is not a bool");
    assert!(matches!(error, Error::Toml(_)));
    assert!(error.to_string().starts_with("Invalid config file: "));
}

#[test]
fn test_invalid_config_error_formatting() {
    let error = Error::InvalidConfig("blank column name configured for Done".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid config: blank column name configured for Done"
    );
}

#[test]
fn test_unknown_stage_name_is_an_invalid_config() {
    let error = "Shipping".parse::<Stage>().expect_err("Not a stage");
    let msg = error.to_string();
    assert!(msg.contains("Shipping"), "Should name the offending value");
    assert!(!msg.contains('\n'), "Error message should be single line");
}
