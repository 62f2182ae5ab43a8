use super::*;
use tempfile::TempDir;

#[test]
fn test_load_yaml_mapping() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.yml");
    fs::write(&path, "common:\n  image: nginx\nregistries: {}\n").expect("write");

    let value = load_yaml(&path).expect("Failed to load YAML");

    assert_eq!(value["common"]["image"].as_str(), Some("nginx"));
    assert!(value["registries"].is_mapping());
}

#[test]
fn test_load_yaml_empty_file_is_empty_mapping() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("empty.yml");
    fs::write(&path, "").expect("write");

    let value = load_yaml(&path).expect("Failed to load YAML");

    assert_eq!(value, Value::Mapping(Mapping::new()));
}

#[test]
fn test_load_yaml_missing_file_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let result = load_yaml(&temp_dir.path().join("missing.yml"));

    assert!(matches!(result, Err(ConfigurationError::Io(_))));
}

#[test]
fn test_load_yaml_invalid_syntax_is_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("broken.yml");
    fs::write(&path, "common: [unclosed\n").expect("write");

    match load_yaml(&path) {
        Err(ConfigurationError::ParseError { path: p, .. }) => {
            assert!(p.ends_with("broken.yml"));
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_dump_yaml_preserves_key_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("out.yml");
    let value: Value = serde_yaml::from_str("zeta: 1\nalpha: 2\nmid: 3\n").expect("parse");

    dump_yaml(&value, &path).expect("Failed to dump YAML");

    let written = fs::read_to_string(&path).expect("read");
    assert_eq!(written, "zeta: 1\nalpha: 2\nmid: 3\n");
}

#[test]
fn test_dump_yaml_creates_parent_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("nested").join("dir").join("out.yml");
    let value: Value = serde_yaml::from_str("a: b\n").expect("parse");

    dump_yaml(&value, &path).expect("Failed to dump YAML");

    assert!(path.exists());
}

#[test]
fn test_load_yaml_resolves_merge_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.yml");
    fs::write(
        &path,
        "base: &b\n  image: registry:2\ncommon:\n  <<: *b\n  port: 5000\n",
    )
    .expect("write");

    let value = load_yaml(&path).expect("Failed to load YAML");

    let common = value["common"].as_mapping().expect("common is a mapping");
    assert!(common.get("<<").is_none());
    assert_eq!(value["common"]["image"].as_str(), Some("registry:2"));
    assert_eq!(value["common"]["port"].as_i64(), Some(5000));
}

#[test]
fn test_load_yaml_merge_key_does_not_override_explicit_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.yml");
    fs::write(
        &path,
        "proxy: &p\n  remoteurl: https://registry.npmjs.org/\n  ttl: 168h\nnpm:\n  proxy:\n    <<: *p\n    ttl: 24h\n",
    )
    .expect("write");

    let value = load_yaml(&path).expect("Failed to load YAML");

    assert_eq!(
        value["npm"]["proxy"]["remoteurl"].as_str(),
        Some("https://registry.npmjs.org/")
    );
    assert_eq!(value["npm"]["proxy"]["ttl"].as_str(), Some("24h"));
}

#[test]
fn test_load_yaml_invalid_merge_key_is_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("config.yml");
    fs::write(&path, "common:\n  <<: 5\n").expect("write");

    let result = load_yaml(&path);

    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn test_write_text_creates_parent_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("out").join("docker-compose.yml");

    write_text(&path, "services: {}\n").expect("write");

    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "services: {}\n"
    );
}
