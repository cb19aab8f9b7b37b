//! # Configuration Loading Tests

use std::io::Write;

use pretty_assertions::assert_eq;
use spikelib_core::EngineError;
use spikelib_core::config::Config;

#[test]
fn empty_object_yields_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.general.isa, "RV64IMAFDC");
    assert_eq!(config.general.start_pc, 0x1000);
    assert_eq!(config.general.trap_vector, 0);
    assert!(!config.general.trace_instructions);
    assert!(config.icache.enabled);
    assert_eq!(config.icache.entries, 1024);
}

#[test]
fn partial_sections_keep_the_other_defaults() {
    let config = Config::from_json(r#"{"general": {"trap_vector": 4096}, "icache": {"enabled": false}}"#)
        .unwrap();
    assert_eq!(config.general.trap_vector, 0x1000);
    assert_eq!(config.general.isa, "RV64IMAFDC");
    assert!(!config.icache.enabled);
    assert_eq!(config.icache.entries, 1024);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        Config::from_json(r#"{"general": {"start_pc": "high"}}"#),
        Err(EngineError::Config(_))
    ));
    assert!(matches!(Config::from_json("{"), Err(EngineError::Config(_))));
}

#[test]
fn loads_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"general": {"isa": "rv64gc"}}"#).unwrap();

    let config = Config::from_path(file.path()).unwrap();
    assert_eq!(config.general.isa, "rv64gc");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_path(dir.path().join("absent.json"));
    assert!(matches!(result, Err(EngineError::Io(_))));
}

#[test]
fn with_isa_only_changes_the_descriptor() {
    let config = Config::with_isa("rv64i");
    assert_eq!(config.general.isa, "rv64i");
    assert_eq!(config.general.start_pc, Config::default().general.start_pc);
}
