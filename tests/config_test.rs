//! Integration tests for Settings config loading with layered precedence.
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test explicit config files merging with defaults.

use std::fs;

use tempfile::TempDir;

use meshmap::application::ApplicationError;
use meshmap::config::Settings;
use meshmap::infrastructure::di::ServiceContainer;

// ============================================================
// Settings::load() with explicit config file
// ============================================================

#[test]
fn given_config_file_when_load_then_overrides_specified_fields_only() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meshmap.toml");
    fs::write(
        &path,
        r#"
[csv]
code_column = "MESH_CODE"
delimiter = "\t"

[transform]
diagnostic_limit = 20
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.csv.code_column, "MESH_CODE");
    assert_eq!(settings.csv.delimiter, '\t');
    assert_eq!(settings.csv.value_column, "Value", "unspecified keeps default");
    assert_eq!(settings.transform.diagnostic_limit, 20);
    assert_eq!(settings.style.dash_array, "3");
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[csv\ncode_column = ").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("broken.toml"), "{err}");
}

#[test]
fn given_invalid_opacity_when_load_then_validation_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meshmap.toml");
    fs::write(&path, "[style]\nopacity = 3.0\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("style.opacity"), "{err}");
}

#[test]
fn given_env_override_when_load_then_env_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meshmap.toml");
    fs::write(&path, "[style]\ncolor = \"black\"\n").unwrap();

    std::env::set_var("MESHMAP__STYLE__COLOR", "navy");
    let settings = Settings::load(Some(&path));
    std::env::remove_var("MESHMAP__STYLE__COLOR");

    assert_eq!(settings.unwrap().style.color, "navy");
}

#[test]
fn given_loaded_settings_when_building_container_then_services_use_them() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("meshmap.toml");
    fs::write(&path, "[transform]\ndiagnostic_limit = 1\n").unwrap();

    let container = ServiceContainer::new(Settings::load(Some(&path)).unwrap());

    assert_eq!(container.transformer.diagnostic_limit(), 1);
    assert_eq!(container.settings.transform.diagnostic_limit, 1);
}

#[test]
fn given_effective_settings_when_to_toml_then_roundtrips() {
    let settings = Settings::default();

    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();

    assert_eq!(parsed, settings);
}
