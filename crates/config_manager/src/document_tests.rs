//! Tests for configuration document loading.

use super::*;
use crate::yaml_io::dump_yaml;
use std::fs;
use tempfile::TempDir;

fn yaml(text: &str) -> Value {
    serde_yaml::from_str(text).expect("Test YAML should parse")
}

fn sample_document() -> ConfigurationDocument {
    ConfigurationDocument::from_value(&yaml(
        r#"
common:
  image: registry:2
  proxy:
    ttl: 168h
registries:
  npm:
    proxy:
      remoteurl: https://registry.npmjs.org/
  docker:
    proxy:
      remoteurl: https://registry-1.docker.io
      ttl: 24h
  broken: just-a-string
"#,
    ))
    .expect("Sample document should be valid")
}

// ============================================================================
// Shape Validation Tests
// ============================================================================

#[test]
fn test_from_value_accepts_valid_document() {
    let document = sample_document();

    assert_eq!(document.common.len(), 2);
    assert_eq!(document.registries.len(), 3);
}

#[test]
fn test_from_value_rejects_non_mapping_root() {
    for raw in ["[1, 2]", "plain", "42"] {
        let result = ConfigurationDocument::from_value(&yaml(raw));
        assert!(
            matches!(result, Err(ConfigurationError::InvalidConfigShape { ref field, .. }) if field == "<root>"),
            "root {raw} should be rejected"
        );
    }
}

#[test]
fn test_from_value_rejects_missing_common() {
    let result = ConfigurationDocument::from_value(&yaml("registries: {}"));

    match result {
        Err(ConfigurationError::InvalidConfigShape { field, reason }) => {
            assert_eq!(field, "common");
            assert_eq!(reason, "missing");
        }
        other => panic!("Expected InvalidConfigShape, got {:?}", other),
    }
}

#[test]
fn test_from_value_rejects_non_mapping_registries() {
    let result = ConfigurationDocument::from_value(&yaml("common: {}\nregistries: [npm]\n"));

    match result {
        Err(ConfigurationError::InvalidConfigShape { field, reason }) => {
            assert_eq!(field, "registries");
            assert_eq!(reason, "must be a mapping");
        }
        other => panic!("Expected InvalidConfigShape, got {:?}", other),
    }
}

#[test]
fn test_from_value_ignores_extra_keys() {
    let document =
        ConfigurationDocument::from_value(&yaml("common: {}\nregistries: {}\nversion: 3\n"))
            .expect("Extra keys should be ignored");

    assert!(document.common.is_empty());
    assert!(document.registries.is_empty());
}

#[test]
fn test_load_empty_file_is_invalid_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.yml");
    fs::write(&path, "").expect("write");

    let result = ConfigurationDocument::load(&path);

    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidConfigShape { .. })
    ));
}

// ============================================================================
// Registry Access Tests
// ============================================================================

#[test]
fn test_registry_mapping_missing_is_not_found() {
    let document = sample_document();

    match document.registry_mapping("pypi") {
        Err(ConfigurationError::RegistryNotFound { name }) => assert_eq!(name, "pypi"),
        other => panic!("Expected RegistryNotFound, got {:?}", other),
    }
}

#[test]
fn test_registry_mapping_non_mapping_is_not_found() {
    let document = sample_document();

    assert!(document.registry("broken").is_some());
    assert!(matches!(
        document.registry_mapping("broken"),
        Err(ConfigurationError::RegistryNotFound { .. })
    ));
}

#[test]
fn test_merged_registry_applies_override() {
    let document = sample_document();

    let merged = document
        .merged_registry("docker")
        .expect("docker registry should merge");

    assert_eq!(merged["image"].as_str(), Some("registry:2"));
    assert_eq!(merged["proxy"]["ttl"].as_str(), Some("24h"));
    assert_eq!(
        merged["proxy"]["remoteurl"].as_str(),
        Some("https://registry-1.docker.io")
    );
}

#[test]
fn test_merged_registry_does_not_change_document() {
    let document = sample_document();
    let before = document.clone();

    let _ = document.merged_registry("docker").expect("merge");

    assert_eq!(document, before);
}

#[test]
fn test_registry_names_sorted() {
    let document = sample_document();

    assert_eq!(document.registry_names(), vec!["broken", "docker", "npm"]);
}

#[test]
fn test_registry_names_with_non_string_keys() {
    let document =
        ConfigurationDocument::from_value(&yaml("common: {}\nregistries: {b: {}, 10: {}, a: {}}\n"))
            .expect("valid");

    assert_eq!(document.registry_names(), vec!["10", "a", "b"]);
}

// ============================================================================
// Round Trip Tests
// ============================================================================

#[test]
fn test_dump_then_load_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.yml");
    let document = sample_document();

    dump_yaml(&document.to_value(), &path).expect("dump");
    let loaded = ConfigurationDocument::load(&path).expect("load");

    assert_eq!(loaded, document);
}

#[test]
fn test_to_value_key_order() {
    let document = sample_document();
    let value = document.to_value();
    let keys: Vec<&str> = value
        .as_mapping()
        .expect("mapping")
        .keys()
        .filter_map(Value::as_str)
        .collect();

    assert_eq!(keys, vec![COMMON_KEY, REGISTRIES_KEY]);
}
