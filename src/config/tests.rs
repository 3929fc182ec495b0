// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
use std::time::Duration;

use super::fields::{FIELDS, Requirement, field, markdown_table};
use super::{Config, ConfigLoader, ToolsConfig};
use crate::error::{ConfigError, KitError};

const MINIMAL: &str = r#"
directory = "/srv/manifests"
service = "api"
image = "registry.example.com/api:1.2.3"
"#;

fn env(vars: &[(&str, &str)]) -> HashMap<String, String> {
    vars.iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn config_error(err: KitError) -> ConfigError {
    match err {
        KitError::Config(inner) => *inner,
        other => panic!("expected config error, got: {other}"),
    }
}

#[test]
fn test_default_config() {
    let options: Vec<String> = Config::default()
        .format_options()
        .iter()
        .map(|line| line.trim_end().to_string())
        .collect();
    insta::assert_snapshot!(options.join("\n"), @r"
    attempts          = 3
    backoff_method    = random
    directory         =
    image             =
    message           = deploykit: push IMAGE to SERVICE in SDIR
    repository        =
    service           =
    service_directory =
    skip_push         = false
    time_unit_ms      = 1000
    tools.git         = git
    tools.kustomize   = kustomize
    ");
}

#[test]
fn test_parse_minimal() {
    let config = Config::parse(MINIMAL).unwrap();
    assert_eq!(config.directory(), Some("/srv/manifests".into()));
    assert_eq!(config.repository(), None);
    assert_eq!(config.image_assignment(), "api=registry.example.com/api:1.2.3");
    assert_eq!(config.attempts, 3);
    assert_eq!(config.time_unit(), Duration::from_secs(1));
    assert_eq!(config.tools, ToolsConfig::default());
}

#[test]
fn test_parse_full() {
    let config = Config::parse(
        r#"
repository = "https://git.example.com/org/manifests.git"
service = "web"
image = "web:2.0"
message = "bump SERVICE"
service_directory = "overlays/prod"
skip_push = true
attempts = 7
backoff_method = "exponential"
time_unit_ms = 250

[tools]
git = "/usr/local/bin/git"
kustomize = "/opt/kustomize"
"#,
    )
    .unwrap();

    assert_eq!(config.directory(), None);
    assert_eq!(
        config.repository(),
        Some("https://git.example.com/org/manifests.git")
    );
    assert!(config.skip_push);
    assert_eq!(config.attempts, 7);
    assert_eq!(config.backoff_method, "exponential");
    assert_eq!(config.time_unit(), Duration::from_millis(250));
    assert_eq!(config.tools.git, std::path::Path::new("/usr/local/bin/git"));
    assert_eq!(config.commit_message().unwrap(), "bump web");
}

#[test]
fn test_missing_source() {
    let err = Config::parse("service = \"api\"\nimage = \"api:1\"").unwrap_err();
    assert!(matches!(config_error(err), ConfigError::MissingSource));
}

#[test]
fn test_missing_required_keys() {
    let err = Config::parse("directory = \".\"\nimage = \"api:1\"").unwrap_err();
    insta::assert_snapshot!(config_error(err).to_string(), @"missing required config key 'service'");

    let err = Config::parse("directory = \".\"\nservice = \"api\"\nimage = \"  \"").unwrap_err();
    insta::assert_snapshot!(config_error(err).to_string(), @"missing required config key 'image'");
}

#[test]
fn test_both_sources_keep_directory() {
    let config = Config::parse(
        r#"
directory = "/srv/manifests"
repository = "https://git.example.com/manifests.git"
service = "api"
image = "api:1"
"#,
    )
    .unwrap();
    assert_eq!(config.directory(), Some("/srv/manifests".into()));
}

#[test]
fn test_empty_message_falls_back_to_default() {
    let config = Config::parse(&format!("{MINIMAL}message = \"\"\n")).unwrap();
    assert_eq!(
        config.commit_message().unwrap(),
        "deploykit: push registry.example.com/api:1.2.3 to api in "
    );
}

#[test]
fn test_values_are_trimmed() {
    let config = Config::parse(
        "directory = \" /srv/m \"\nservice = \" api\"\nimage = \"api:1 \"\nbackoff_method = \" Random \"",
    )
    .unwrap();
    assert_eq!(config.directory, "/srv/m");
    assert_eq!(config.image_assignment(), "api=api:1");
    assert_eq!(config.backoff_method, "Random");
}

#[test]
fn test_unknown_tools_key_rejected() {
    let err = Config::parse(&format!("{MINIMAL}[tools]\nhelm = \"helm\"\n")).unwrap_err();
    assert!(matches!(config_error(err), ConfigError::ParseError { .. }));
}

#[test]
fn test_invalid_toml() {
    let err = Config::parse("service = ").unwrap_err();
    assert!(matches!(config_error(err), ConfigError::ParseError { .. }));
}

#[test]
fn test_env_overrides_file() {
    let config = ConfigLoader::new()
        .add_toml_str(MINIMAL)
        .with_env_prefix("DK")
        .with_env_source(env(&[
            ("DK_IMAGE", "registry.example.com/api:9.9.9"),
            ("DK_SERVICE_DIRECTORY", "overlays/staging"),
            ("DK_SKIP_PUSH", "true"),
            ("DK_ATTEMPTS", "5"),
            ("DK_SERVICE", ""),
        ]))
        .build()
        .unwrap();

    assert_eq!(config.image, "registry.example.com/api:9.9.9");
    assert_eq!(config.service_directory, "overlays/staging");
    assert!(config.skip_push);
    assert_eq!(config.attempts, 5);
    // Empty variables are ignored.
    assert_eq!(config.service, "api");
}

#[test]
fn test_env_numeric_looking_strings_kept_verbatim() {
    let config = ConfigLoader::new()
        .with_env_prefix("DK")
        .with_env_source(env(&[
            ("DK_DIRECTORY", "/repo"),
            ("DK_SERVICE", "007"),
            ("DK_IMAGE", "1.10"),
            ("DK_SERVICE_DIRECTORY", "01"),
            ("DK_MESSAGE", "2.50"),
            ("DK_ATTEMPTS", "4"),
            ("DK_TIME_UNIT_MS", "250"),
            ("DK_SKIP_PUSH", "true"),
        ]))
        .build()
        .unwrap();

    assert_eq!(
        (config.service.as_str(), config.image.as_str()),
        ("007", "1.10")
    );
    assert_eq!(config.service_directory, "01");
    assert_eq!(config.message, "2.50");
    assert_eq!(config.attempts, 4);
    assert_eq!(config.time_unit_ms, 250);
    assert!(config.skip_push);
}

#[test]
fn test_env_only() {
    let config = ConfigLoader::new()
        .with_env_prefix("DK")
        .with_env_source(env(&[
            ("DK_REPOSITORY", "https://git.example.com/m.git"),
            ("DK_SERVICE", "api"),
            ("DK_IMAGE", "api:1"),
            ("DK_BACKOFF_METHOD", "exponential"),
            ("OTHER_VARIABLE", "ignored"),
        ]))
        .build()
        .unwrap();

    assert_eq!(config.repository(), Some("https://git.example.com/m.git"));
    assert_eq!(config.backoff_method, "exponential");
}

#[test]
fn test_cli_overrides_env() {
    let config = ConfigLoader::new()
        .add_toml_str(MINIMAL)
        .with_env_prefix("DK")
        .with_env_source(env(&[("DK_IMAGE", "api:from-env")]))
        .set_if_present("image", Some("api:from-flag"))
        .unwrap()
        .set_if_present("service", Some(""))
        .unwrap()
        .set_if_present("message", None)
        .unwrap()
        .set("attempts", 1_i64)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.image, "api:from-flag");
    assert_eq!(config.service, "api");
    assert_eq!(config.attempts, 1);
}

#[test]
fn test_missing_required_file() {
    let err = ConfigLoader::new()
        .add_toml_file("/nonexistent/deploykit.toml")
        .build()
        .unwrap_err();
    assert!(matches!(config_error(err), ConfigError::ParseError { .. }));
}

#[test]
fn test_optional_and_required_files() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("deploykit.toml");
    let extra = temp.path().join("extra.toml");
    std::fs::write(&base, MINIMAL).unwrap();
    std::fs::write(&extra, "attempts = 9\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&base)
        .add_toml_file_optional(temp.path().join("missing.toml"))
        .add_toml_file(&extra);
    assert_eq!(loader.loaded_files().len(), 2);
    assert_eq!(loader.format_loaded_files()[1], format!("2. [file] {}", extra.display()));

    let config = loader.build().unwrap();
    assert_eq!(config.service, "api");
    assert_eq!(config.attempts, 9);
}

#[test]
fn test_build_unvalidated_accepts_incomplete() {
    let config = ConfigLoader::new()
        .add_toml_str("attempts = 0")
        .build_unvalidated()
        .unwrap();
    assert_eq!(config.attempts, 0);
    assert!(config.service.is_empty());
}

#[test]
fn test_fields_table() {
    insta::assert_snapshot!(markdown_table(&FIELDS), @r"
    | Name             | Field Type | Default                                  | Flag Name         | Env Variable Key     | Required |
    |------------------|------------|------------------------------------------|-------------------|----------------------|----------|
    | Directory        | string     |                                          | directory         | DK_DIRECTORY         | Y*       |
    | Repository       | string     |                                          | repository        | DK_REPOSITORY        | Y*       |
    | Service          | string     |                                          | service           | DK_SERVICE           | Y        |
    | Image            | string     |                                          | image             | DK_IMAGE             | Y        |
    | Message          | string     | deploykit: push IMAGE to SERVICE in SDIR | message           | DK_MESSAGE           |          |
    | ServiceDirectory | string     |                                          | service-directory | DK_SERVICE_DIRECTORY |          |
    | SkipPush         | bool       | false                                    | skip-push         | DK_SKIP_PUSH         |          |
    | Attempts         | int        | 3                                        | attempts          | DK_ATTEMPTS          |          |
    | BackoffMethod    | string     | random                                   | backoff-method    | DK_BACKOFF_METHOD    |          |
    | TimeUnitMs       | int        | 1000                                     | time-unit-ms      | DK_TIME_UNIT_MS      |          |
    ");
}

#[test]
fn test_fields_match_defaults() {
    let defaults = Config::default();
    let options = defaults.format_options();
    for meta in &FIELDS {
        assert_eq!(meta.env, format!("DK_{}", meta.key.to_uppercase()));
        assert_eq!(meta.flag, meta.key.replace('_', "-"));
        let line = options
            .iter()
            .find(|line| line.starts_with(&format!("{} ", meta.key)))
            .unwrap_or_else(|| panic!("no option line for {}", meta.key));
        assert!(line.ends_with(&format!("= {}", meta.default)), "{line}");
    }
}

#[test]
fn test_field_lookup() {
    let service = field("service").unwrap();
    assert_eq!(service.requirement, Requirement::Required);
    assert!(service.requirement.is_required());
    assert!(Requirement::OneOf.is_required());
    assert!(!Requirement::Optional.is_required());
    assert!(field("unknown").is_none());
}
