// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the `deploykit` binary.
//!
//! Each test runs the binary in its own scratch directory so a
//! `deploykit.toml` in the working tree is never picked up.

use std::path::Path;
use std::process::{Command, Output};

use clap::Parser;
use deploykit_rs::cli::Cli;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn deploykit(cwd: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_deploykit"));
    command.args(args).current_dir(cwd).arg("--no-timestamps");
    for (key, _) in std::env::vars() {
        if key.starts_with("DK_") {
            command.env_remove(key);
        }
    }
    command.output().expect("failed to run deploykit")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["deploykit", "deploy", "helm"]).is_err());
}

#[test]
fn cli_deploy_requires_subcommand() {
    assert!(Cli::try_parse_from(["deploykit", "deploy"]).is_err());
}

#[test]
fn cli_attempts_must_be_integer() {
    let result = Cli::try_parse_from(["deploykit", "deploy", "kustomize", "--attempts", "many"]);
    assert!(result.is_err());
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn binary_version() {
    let temp = temp_dir();
    let output = deploykit(temp.path(), &["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with(&format!("Version:       {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn binary_print_action() {
    let temp = temp_dir();
    let output = deploykit(temp.path(), &["print-action"]);
    assert!(output.status.success());

    let action: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(action["name"].as_str(), Some("GitOps Deploykit"));
    assert_eq!(action["runs"]["using"].as_str(), Some("docker"));
    assert_eq!(
        action["runs"]["env"]["DK_IMAGE"].as_str(),
        Some("${{ inputs.image }}")
    );
    assert_eq!(action["inputs"]["service"]["required"].as_bool(), Some(true));
}

#[test]
fn binary_print_config() {
    let temp = temp_dir();
    let output = deploykit(temp.path(), &["print-config"]);
    assert!(output.status.success());

    let table = stdout(&output);
    assert!(table.starts_with("| Name "));
    assert!(table.contains("| DK_SERVICE_DIRECTORY |"));
    assert_eq!(table.lines().count(), 12);
}

#[test]
fn binary_options_reads_local_config() {
    let temp = temp_dir();
    std::fs::write(
        temp.path().join("deploykit.toml"),
        "service = \"api\"\nattempts = 8\n",
    )
    .unwrap();

    let output = deploykit(temp.path(), &["options"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("attempts          = 8"));
    assert!(text.contains("service           = api"));
    assert!(text.contains("[optional] deploykit.toml"));
}

#[test]
fn binary_deploy_without_source_fails() {
    let temp = temp_dir();
    let output = deploykit(temp.path(), &["deploy", "kustomize", "-s", "api", "-i", "api:1"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output).contains("need an existing repository directory or a repository url to clone"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn binary_deploy_missing_config_file_fails() {
    let temp = temp_dir();
    let output = deploykit(
        temp.path(),
        &["--config", "absent.toml", "deploy", "kustomize", "-d", "."],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
}

#[test]
fn binary_no_command_fails() {
    let temp = temp_dir();
    let output = deploykit(temp.path(), &[]);
    assert!(!output.status.success());
    insta::assert_snapshot!(
        stderr(&output).trim_end(),
        @"Error: no command specified, use --help for usage information"
    );
}

#[cfg(unix)]
#[test]
fn binary_deploy_skip_push_with_fake_tools() {
    use std::os::unix::fs::PermissionsExt;

    let temp = temp_dir();
    let root = temp.path();
    let log = root.join("calls.log");
    for tool in ["git", "kustomize"] {
        let path = root.join(format!("fake-{tool}"));
        std::fs::write(
            &path,
            format!("#!/bin/sh\necho \"{tool} $*\" >> \"{}\"\n", log.display()),
        )
        .unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    std::fs::create_dir_all(root.join("manifests/overlays/dev")).unwrap();
    std::fs::write(
        root.join("tools.toml"),
        format!(
            "[tools]\ngit = \"{}\"\nkustomize = \"{}\"\n",
            root.join("fake-git").display(),
            root.join("fake-kustomize").display()
        ),
    )
    .unwrap();

    let output = deploykit(
        root,
        &[
            "--config",
            "tools.toml",
            "deploy",
            "kustomize",
            "-d",
            "manifests",
            "-s",
            "web",
            "-i",
            "web:4.2",
            "-e",
            "overlays/dev",
            "--skip-push",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    insta::assert_snapshot!(std::fs::read_to_string(&log).unwrap(), @r"
    git pull --rebase
    kustomize edit set image web=web:4.2
    git commit --all --message deploykit: push web:4.2 to web in overlays/dev
    ");
}
