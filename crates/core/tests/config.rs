//! Configuration loading and id generation.

use pretty_assertions::assert_eq;
use sculpt_core::model::IdGenerator;
use sculpt_core::{parse_to_module_list, ConfigError, ImportConfig, Importer};

#[test]
fn test_empty_json_is_the_default() {
    assert_eq!(ImportConfig::from_json("{}").unwrap(), ImportConfig::default());
}

#[test]
fn test_defaults() {
    let config = ImportConfig::default();
    assert_eq!(config.id_source_tag, "import");
    assert_eq!(config.seed, None);
    assert_eq!((config.min_columns, config.max_columns), (2, 8));
    assert_eq!(config.section_inner_width, 1200);
    assert_eq!(config.column_gap, 30);
    assert!(config.structured_markers.contains(&"tb-section".to_string()));
}

#[test]
fn test_partial_json_overrides() {
    let config =
        ImportConfig::from_json(r#"{"id_source_tag": "site", "seed": 7, "column_gap": 24}"#)
            .unwrap();
    assert_eq!(config.id_source_tag, "site");
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.column_gap, 24);
    assert_eq!(config.max_columns, 8);
}

#[test]
fn test_invalid_configs_are_rejected() {
    assert!(matches!(
        ImportConfig::from_json(r#"{"min_columns": 1}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        ImportConfig::from_json(r#"{"min_columns": 4, "max_columns": 3}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        ImportConfig::from_json(r#"{"id_source_tag": "two words"}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        ImportConfig::from_json("not json"),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn test_missing_file_reports_path() {
    let err = ImportConfig::from_path("/definitely/not/here/sculpt.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here/sculpt.json"));
}

#[test]
fn test_config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("sculpt-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"section_inner_width": 1440}"#).unwrap();
    let config = ImportConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.section_inner_width, 1440);
}

#[test]
fn test_source_tag_and_seed_shape_ids() {
    let config = ImportConfig {
        id_source_tag: "site".to_string(),
        ..ImportConfig::default()
    }
    .with_seed(1);
    let modules = Importer::new(config.clone()).parse_to_module_list("<h1>A</h1>");
    assert!(modules[0].id.starts_with("heading_site_1_"), "{}", modules[0].id);

    let again = Importer::new(config).parse_to_module_list("<h1>A</h1>");
    assert_eq!(modules[0].id, again[0].id);
}

#[test]
fn test_seeded_generator_sequence() {
    let mut a = IdGenerator::new("import", Some(99));
    let mut b = IdGenerator::new("import", Some(99));
    let first: Vec<String> = (0..5).map(|_| a.next("row")).collect();
    let second: Vec<String> = (0..5).map(|_| b.next("row")).collect();
    assert_eq!(first, second);
    assert_eq!(a.issued(), 5);
    assert!(first[4].starts_with("row_import_5_"));
}

#[test]
fn test_unseeded_ids_still_unique() {
    let mut ids = IdGenerator::new("import", None);
    let first = ids.next("text");
    let second = ids.next("text");
    assert_ne!(first, second);
    assert_eq!(first.rsplit('_').next().unwrap().len(), 8);

    // Counters restart with every call
    let a = parse_to_module_list("<h1>A</h1>");
    let b = parse_to_module_list("<h1>A</h1>");
    assert!(a[0].id.starts_with("heading_import_1_"));
    assert!(b[0].id.starts_with("heading_import_1_"));
}
