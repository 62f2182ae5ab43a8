use super::*;
use std::fs;
use tempfile::TempDir;

const COMPOSE_TEMPLATE: &str = r#"# generated from {{config_path}}
services:
{{#each config.registries}}
  {{regex_replace @key "[^a-z0-9]" "-"}}:
{{#with (merge ../config.common this)}}
    image: {{image}}
    container_name: {{default container_name "registry"}}
{{/with}}
{{/each}}
"#;

fn config() -> serde_yaml::Value {
    serde_yaml::from_str(
        r#"
common:
  image: registry:2
registries:
  npm_js:
    container_name: npm-proxy
  docker:
    image: registry:2.8
"#,
    )
    .expect("config should parse")
}

#[test]
fn test_render_config_template_compose() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let template_path = temp_dir.path().join("docker-compose.yml.hbs");
    fs::write(&template_path, COMPOSE_TEMPLATE).expect("write template");

    let rendered = render_config_template(
        &template_path,
        "config.yml",
        &config(),
        TemplateRenderConfig::default(),
    )
    .expect("render");

    let parsed: serde_yaml::Value = serde_yaml::from_str(&rendered).expect("output is YAML");
    assert_eq!(
        parsed["services"]["npm-js"]["container_name"].as_str(),
        Some("npm-proxy")
    );
    assert_eq!(parsed["services"]["npm-js"]["image"].as_str(), Some("registry:2"));
    assert_eq!(parsed["services"]["docker"]["image"].as_str(), Some("registry:2.8"));
    assert_eq!(
        parsed["services"]["docker"]["container_name"].as_str(),
        Some("registry")
    );
    assert!(rendered.starts_with("# generated from config.yml\n"));
}

#[test]
fn test_render_config_template_strict_missing_variable() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let template_path = temp_dir.path().join("t.hbs");
    fs::write(&template_path, "{{config.nope}}").expect("write template");

    let result = render_config_template(
        &template_path,
        "config.yml",
        &config(),
        TemplateRenderConfig {
            strict_variables: true,
            ..Default::default()
        },
    );

    assert!(matches!(
        result,
        Err(TemplateError::VariableValidation { .. })
    ));
}
