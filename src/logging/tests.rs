// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_range() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);

    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'log_level': log level must be 0-5, got 9");
}

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<&str> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    assert_eq!(filters, ["off", "error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_log_level_tracing_level() {
    assert_eq!(LogLevel::SILENT.to_tracing_level(), None);
    assert_eq!(LogLevel::WARN.to_tracing_level(), Some(Level::WARN));
    assert_eq!(LogLevel::TRACE.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn test_log_level_serde() {
    let yaml = serde_yaml::to_string(&LogLevel::DEBUG).unwrap();
    assert_eq!(yaml.trim(), "4");

    let parsed: LogLevel = serde_yaml::from_str("2").unwrap();
    assert_eq!(parsed, LogLevel::WARN);

    assert!(serde_yaml::from_str::<LogLevel>("7").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(config.show_timestamps());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::DEBUG)
        .with_log_file("logs/deploykit.log".to_string())
        .with_show_timestamps(false)
        .build();
    assert_eq!(config.console_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some("logs/deploykit.log"));
    assert!(!config.show_timestamps());
}
