// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::version::VersionInfo;

#[test]
fn test_version_render() {
    let info = VersionInfo {
        version: "0.1.0",
        git_commit: "abc1234",
        build_date: "[Not Provided]",
        platform: "linux/x86_64".to_string(),
    };
    insta::assert_snapshot!(info.render(), @r"
    Version:       0.1.0
    Git Commit:    abc1234
    Build Date:    [Not Provided]
    Platform:      linux/x86_64
    ");
}

#[test]
fn test_version_current_uses_package_version() {
    let info = VersionInfo::current();
    assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    assert!(info.platform.contains('/'));
}
