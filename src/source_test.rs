// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for source module

use super::source::*;
use crate::tinydns_types::NormalizedType;
use crate::types::SourceError;
use crate::zones::{Zone, ZoneSink};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn data_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("Failed to write data file");
    }
    dir
}

fn clear_env() {
    std::env::remove_var("TINYDNS_SOURCE_ID");
    std::env::remove_var("TINYDNS_DIR");
    std::env::remove_var("TINYDNS_DEFAULT_TTL");
}

// ========== Configuration ==========

#[test]
fn test_config_deserialize_default_ttl() {
    let config: SourceConfig =
        serde_json::from_str(r#"{"id": "tinydns", "directory": "/srv/tinydns"}"#).unwrap();
    assert_eq!(config.id, "tinydns");
    assert_eq!(config.directory.to_str(), Some("/srv/tinydns"));
    assert_eq!(config.default_ttl, 3600);
}

#[test]
fn test_config_deserialize_custom_ttl() {
    let config: SourceConfig = serde_json::from_str(
        r#"{"id": "tinydns", "directory": "/srv/tinydns", "defaultTtl": 300}"#,
    )
    .unwrap();
    assert_eq!(config.default_ttl, 300);
}

#[test]
fn test_config_validate_rejects_zero_ttl() {
    let mut config = SourceConfig::new("tinydns", "/srv/tinydns");
    assert!(config.validate().is_ok());

    config.default_ttl = 0;
    assert!(matches!(
        config.validate(),
        Err(SourceError::InvalidConfig(_))
    ));
    assert!(TinyDnsFileSource::new(config).is_err());
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_env();
    let config = SourceConfig::from_env().unwrap();
    assert_eq!(config.id, "tinydns");
    assert_eq!(config.directory.to_str(), Some("./zones"));
    assert_eq!(config.default_ttl, 3600);
}

#[test]
#[serial]
fn test_config_from_env_overrides() {
    clear_env();
    std::env::set_var("TINYDNS_SOURCE_ID", "legacy");
    std::env::set_var("TINYDNS_DIR", "/data/tinydns");
    std::env::set_var("TINYDNS_DEFAULT_TTL", "900");

    let config = SourceConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.id, "legacy");
    assert_eq!(config.directory.to_str(), Some("/data/tinydns"));
    assert_eq!(config.default_ttl, 900);
}

#[test]
#[serial]
fn test_config_from_env_invalid_ttl() {
    clear_env();
    std::env::set_var("TINYDNS_DEFAULT_TTL", "hourly");
    let result = SourceConfig::from_env();
    std::env::set_var("TINYDNS_DEFAULT_TTL", "0");
    let zero = SourceConfig::from_env();
    clear_env();

    assert!(matches!(result, Err(SourceError::InvalidConfig(_))));
    assert!(matches!(zero, Err(SourceError::InvalidConfig(_))));
}

// ========== Directory Line Source ==========

#[test]
fn test_directory_lines_skip_hidden_files_and_blank_lines() {
    let dir = data_dir(&[
        ("a-data", "+www.example.com:192.0.2.1\n\n+api.example.com:192.0.2.2\n"),
        ("b-data", "Cftp.example.com:www.example.com"),
        (".hidden", "+secret.example.com:192.0.2.99\n"),
    ]);

    let source = DirectoryLineSource::new(dir.path());
    let lines = source.lines().unwrap();

    assert_eq!(
        lines,
        &[
            "+www.example.com:192.0.2.1".to_string(),
            "+api.example.com:192.0.2.2".to_string(),
            "Cftp.example.com:www.example.com".to_string(),
        ]
    );
}

#[test]
fn test_directory_lines_skip_subdirectories() {
    let dir = data_dir(&[("data", "+www.example.com:192.0.2.1\n")]);
    fs::create_dir(dir.path().join("archive")).unwrap();

    let source = DirectoryLineSource::new(dir.path());
    assert_eq!(source.lines().unwrap().len(), 1);
}

#[test]
fn test_directory_lines_are_loaded_once() {
    let dir = data_dir(&[("data", "+www.example.com:192.0.2.1\n")]);
    let source = DirectoryLineSource::new(dir.path());
    assert_eq!(source.lines().unwrap().len(), 1);

    fs::write(dir.path().join("more"), "+api.example.com:192.0.2.2\n").unwrap();
    assert_eq!(source.lines().unwrap().len(), 1);
}

#[test]
fn test_directory_missing() {
    let dir = TempDir::new().unwrap();
    let source = DirectoryLineSource::new(dir.path().join("missing"));
    assert!(matches!(source.lines(), Err(SourceError::Io { .. })));
}

// ========== File Source ==========

#[test]
fn test_file_source_populates_forward_and_reverse_zones() {
    let dir = data_dir(&[(
        "data",
        "=www.example.com:192.0.2.1:300\n\
         @example.com::mx.example.com:10\n\
         ^5.2.0.192.in-addr.arpa:printer.example.com\n",
    )]);

    let mut config = SourceConfig::new("tinydns", dir.path());
    config.default_ttl = 1800;
    let source = TinyDnsFileSource::new(config).unwrap();
    assert_eq!(source.id(), "tinydns");

    let mut forward = Zone::new("example.com.").unwrap();
    assert_eq!(source.populate(&mut forward).unwrap(), 2);
    assert_eq!(forward.find("www", NormalizedType::A).unwrap().ttl, 300);
    assert_eq!(forward.find("", NormalizedType::Mx).unwrap().ttl, 1800);

    let mut reverse = Zone::new("2.0.192.in-addr.arpa.").unwrap();
    assert_eq!(source.populate(&mut reverse).unwrap(), 2);
    assert!(reverse.find("1", NormalizedType::Ptr).is_some());
    assert!(reverse.find("5", NormalizedType::Ptr).is_some());
    assert_eq!(reverse.record_count(), 2);
}

#[test]
fn test_file_source_propagates_populate_errors() {
    let dir = data_dir(&[("data", "=bad.example.com:not-an-address\n")]);
    let source = TinyDnsFileSource::new(SourceConfig::new("tinydns", dir.path())).unwrap();

    let mut reverse = Zone::new("2.0.192.in-addr.arpa.").unwrap();
    assert!(matches!(
        source.populate(&mut reverse),
        Err(SourceError::Populate(_))
    ));
}
