use writewise::config::{Config, StorageBackend};

#[test]
fn minimal_config_deserializes_with_defaults() {
    let toml = r#"
api_key = "abc"
default_temperature = 0.4
"#;

    let parsed: Config = toml::from_str(toml).expect("minimal config should deserialize");

    assert_eq!(parsed.api_key.as_deref(), Some("abc"));
    assert_eq!(parsed.default_model, "gemini-2.5-flash");
    assert!((parsed.default_temperature - 0.4).abs() < f64::EPSILON);
    assert_eq!(parsed.storage.backend, StorageBackend::Sqlite);
    assert_eq!(parsed.history.task_library_capacity, 5);
    assert_eq!(parsed.history.assessment_history_capacity, 3);
    assert_eq!(parsed.export.filename_prefix, "C1_Assessment");
    assert_eq!(parsed.observability.log_level, "warn");
    assert!(parsed.validate().is_ok());
}

#[test]
fn sections_override_defaults() {
    let toml = r#"
default_model = "gemini-2.5-pro"

[provider]
base_url = "http://localhost:9999"
timeout_secs = 10

[storage]
backend = "memory"

[history]
task_library_capacity = 8

[export]
directory = "~/exports"
filename_prefix = "Mock"
"#;

    let parsed: Config = toml::from_str(toml).expect("config should deserialize");

    assert_eq!(parsed.provider.base_url, "http://localhost:9999");
    assert_eq!(parsed.provider.timeout_secs, 10);
    assert_eq!(parsed.storage.backend, StorageBackend::Memory);
    assert_eq!(parsed.history.task_library_capacity, 8);
    assert_eq!(parsed.history.assessment_history_capacity, 3);
    assert_eq!(parsed.export.filename_prefix, "Mock");
    assert!(!parsed.export_dir().to_string_lossy().starts_with('~'));
}

#[test]
fn default_config_survives_toml_round_trip() {
    let config = Config::default();
    let text = toml::to_string_pretty(&config).expect("serialize");
    let parsed: Config = toml::from_str(&text).expect("deserialize");

    assert_eq!(parsed.default_model, config.default_model);
    assert_eq!(parsed.provider.base_url, config.provider.base_url);
    assert_eq!(
        parsed.history.assessment_history_capacity,
        config.history.assessment_history_capacity
    );
}
