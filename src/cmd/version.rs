// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version command.

/// Placeholder for build metadata that was not supplied at compile time.
pub const NOT_PROVIDED: &str = "[Not Provided]";

/// Version and build information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_date: &'static str,
    pub platform: String,
}

impl VersionInfo {
    /// Reads build metadata from `DEPLOYKIT_GIT_COMMIT` and
    /// `DEPLOYKIT_BUILD_DATE` at compile time.
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_commit: option_env!("DEPLOYKIT_GIT_COMMIT").unwrap_or(NOT_PROVIDED),
            build_date: option_env!("DEPLOYKIT_BUILD_DATE").unwrap_or(NOT_PROVIDED),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Version:       {}\nGit Commit:    {}\nBuild Date:    {}\nPlatform:      {}",
            self.version, self.git_commit, self.build_date, self.platform
        )
    }
}

/// Print version and build information.
pub fn run_version_command() {
    println!("{}", VersionInfo::current().render());
}
