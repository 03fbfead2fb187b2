//! Integration tests for chatlens-config crate.

use chatlens_common::{InsightsError, RecordScope};
use chatlens_config::{CategoryConfig, Config, ConfigLoader, DEFAULT_TOP_N, DEFAULT_UTC_OFFSET_MINUTES};
use proptest::prelude::*;

const PARTIAL_YAML: &str = r#"
database:
  path: "/var/lib/chatbot/rag_app.db"
  in_scope_only: false
time:
  utc_offset_minutes: -300
report:
  locations: ["Pune", "Nagpur"]
"#;

#[test]
fn test_default_config_validation() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    assert_eq!(config.report.top_n, DEFAULT_TOP_N);
    assert_eq!(config.time.utc_offset_minutes, DEFAULT_UTC_OFFSET_MINUTES);
    assert_eq!(config.database.table, "application_logs");
    assert_eq!(config.database.scope(), RecordScope::InScopeOnly);
    assert_eq!(config.database.out_of_scope_patterns, ["%capital%", "%2+2%"]);

    let names: Vec<&str> = config.report.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Hostel", "Placement", "Fees", "Admission", "Curriculum"]);
    assert_eq!(config.report.locations.len(), 6);
}

#[test]
fn test_default_offset_is_ist() {
    let offset = Config::default().time.local_offset().unwrap();
    assert_eq!(offset.local_minus_utc(), 19_800);
}

#[test]
fn test_partial_yaml_keeps_defaults() {
    let config = ConfigLoader::parse(PARTIAL_YAML).unwrap();

    assert_eq!(config.database.path.to_str(), Some("/var/lib/chatbot/rag_app.db"));
    assert_eq!(config.database.table, "application_logs");
    assert_eq!(config.database.scope(), RecordScope::All);
    assert_eq!(config.time.utc_offset_minutes, -300);
    assert_eq!(config.report.locations, ["Pune", "Nagpur"]);
    assert_eq!(config.report.top_n, DEFAULT_TOP_N);
    assert_eq!(config.report.categories.len(), 5);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(ConfigLoader::parse("  \n").unwrap(), Config::default());
}

#[test]
fn test_malformed_yaml_is_serialization_error() {
    let err = ConfigLoader::parse("report: [unclosed").unwrap_err();
    assert!(matches!(err, InsightsError::Serialization(_)));
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::default();
    config.report.top_n = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.database.table = "logs; DROP TABLE logs".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.time.utc_offset_minutes = 24 * 60;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.report.categories.push(CategoryConfig::new("Hostel", &["dorm"]));
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.report.categories.push(CategoryConfig::new("Transport", &[]));
    assert!(config.validate().is_err());

    // A blank keyword would match nearly every query.
    let mut config = Config::default();
    config.report.categories = vec![
        CategoryConfig::new("Hostel", &["hostel"]),
        CategoryConfig::new("Other", &[" "]),
    ];
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.report.locations.push("  ".to_string());
    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new(dir.path().join("chatlens.yaml"));

    let mut config = Config::default();
    config.report.top_n = 5;
    config.database.out_of_scope_patterns = vec!["%joke%".to_string()];

    loader.save(&config).await.unwrap();
    let loaded = loader.load().await.unwrap();
    assert_eq!(loaded, config);

    // Overwriting leaves exactly one file behind.
    loader.save(&Config::default()).await.unwrap();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new(dir.path().join("absent.yaml"));
    assert!(matches!(loader.load().await, Err(InsightsError::Io(_))));
}

#[tokio::test]
async fn test_load_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "report:\n  top_n: 0\n").unwrap();

    let err = ConfigLoader::new(&path).load().await.unwrap_err();
    assert!(matches!(err, InsightsError::Config(_)));
}

proptest! {
    #[test]
    fn test_property_offsets_within_a_day_validate(minutes in -1439i32..=1439) {
        let mut config = Config::default();
        config.time.utc_offset_minutes = minutes;
        prop_assert!(config.validate().is_ok());
        prop_assert_eq!(config.time.local_offset().unwrap().local_minus_utc(), minutes * 60);
    }

    #[test]
    fn test_property_offsets_beyond_a_day_fail(minutes in 1440i32..100_000) {
        let mut config = Config::default();
        config.time.utc_offset_minutes = minutes;
        prop_assert!(config.validate().is_err());
        config.time.utc_offset_minutes = -minutes;
        prop_assert!(config.validate().is_err());
    }
}
