// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for deploykit.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. deploykit.toml (cwd, optional)
//! 3. --config
//! 4. DK_* env vars (empty values ignored)
//! 5. CLI flags (only when given)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! DK_SERVICE=api                 → service = "api"
//! DK_SERVICE_DIRECTORY=overlays  → service_directory = "overlays"
//! DK_SKIP_PUSH=true              → skip_push = true
//! ```
//!
//! The `[tools]` table is only read from files:
//!
//! ```toml
//! [tools]
//! git = "/usr/bin/git"
//! kustomize = "kustomize"
//! ```

pub mod fields;
pub mod loader;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::deploy::message::{DEFAULT_MESSAGE, render_message};
use crate::error::{ConfigError, KitResult, Result};

use loader::ConfigLoader;

/// Default number of push attempts.
pub const DEFAULT_ATTEMPTS: i64 = 3;

/// Default length of one backoff unit, in milliseconds.
pub const DEFAULT_TIME_UNIT_MS: u64 = 1000;

/// External executables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git: PathBuf,
    pub kustomize: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            kustomize: PathBuf::from("kustomize"),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Existing checkout to update.
    pub directory: String,
    /// Repository URL to clone when no directory is given.
    pub repository: String,
    /// Image name in the kustomization, left of `=`.
    pub service: String,
    /// New image reference, right of `=`.
    pub image: String,
    /// Commit message template.
    pub message: String,
    /// Sub-directory holding `kustomization.yaml`.
    pub service_directory: String,
    pub skip_push: bool,
    pub attempts: i64,
    pub backoff_method: String,
    pub time_unit_ms: u64,
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: String::new(),
            repository: String::new(),
            service: String::new(),
            image: String::new(),
            message: DEFAULT_MESSAGE.to_string(),
            service_directory: String::new(),
            skip_push: false,
            attempts: DEFAULT_ATTEMPTS,
            backoff_method: "random".to_string(),
            time_unit_ms: DEFAULT_TIME_UNIT_MS,
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use deploykit_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("deploykit.toml")
    ///     .with_env_prefix("DK")
    ///     .build()?;
    /// # Ok::<(), deploykit_rs::error::KitError>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML, does not match the
    /// `Config` structure or fails validation.
    pub fn parse(content: &str) -> KitResult<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Normalizes values and checks required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSource`] when neither `directory` nor
    /// `repository` is set, and [`ConfigError::MissingKey`] when `service` or
    /// `image` is empty.
    pub fn resolve_and_validate(&mut self) -> KitResult<()> {
        for value in [
            &mut self.directory,
            &mut self.repository,
            &mut self.service,
            &mut self.image,
            &mut self.service_directory,
            &mut self.backoff_method,
        ] {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }

        if self.message.trim().is_empty() {
            self.message = DEFAULT_MESSAGE.to_string();
        }

        match (self.directory.is_empty(), self.repository.is_empty()) {
            (true, true) => return Err(ConfigError::MissingSource.into()),
            (false, false) => warn!(
                directory = %self.directory,
                repository = %self.repository,
                "both directory and repository are set, using directory"
            ),
            _ => {}
        }

        for (key, value) in [("service", &self.service), ("image", &self.image)] {
            if value.is_empty() {
                return Err(ConfigError::MissingKey {
                    key: key.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Existing checkout, if configured.
    #[must_use]
    pub fn directory(&self) -> Option<PathBuf> {
        (!self.directory.is_empty()).then(|| PathBuf::from(&self.directory))
    }

    /// Repository URL, if configured.
    #[must_use]
    pub fn repository(&self) -> Option<&str> {
        (!self.repository.is_empty()).then_some(self.repository.as_str())
    }

    /// `<service>=<image>` argument for `kustomize edit set image`.
    #[must_use]
    pub fn image_assignment(&self) -> String {
        format!("{}={}", self.service, self.image)
    }

    /// Renders the commit message template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be rendered.
    pub fn commit_message(&self) -> Result<String> {
        render_message(
            &self.message,
            &self.image,
            &self.service,
            &self.service_directory,
        )
    }

    /// Length of one backoff unit.
    #[must_use]
    pub const fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert("directory", self.directory.clone());
        options.insert("repository", self.repository.clone());
        options.insert("service", self.service.clone());
        options.insert("image", self.image.clone());
        options.insert("message", self.message.clone());
        options.insert("service_directory", self.service_directory.clone());
        options.insert("skip_push", self.skip_push.to_string());
        options.insert("attempts", self.attempts.to_string());
        options.insert("backoff_method", self.backoff_method.clone());
        options.insert("time_unit_ms", self.time_unit_ms.to_string());
        options.insert("tools.git", self.tools.git.display().to_string());
        options.insert(
            "tools.kustomize",
            self.tools.kustomize.display().to_string(),
        );

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
