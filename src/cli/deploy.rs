// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deploy command arguments.
//!
//! ```text
//! deploy kustomize -d DIR | -r URL  -s SERVICE -i IMAGE
//!                  [-m MSG] [-e SDIR] [--skip-push]
//!                  [--attempts N] [--backoff-method M] [--time-unit-ms MS]
//! ```
//!
//! Every flag is optional here; the merged configuration decides what is
//! missing.

use clap::{Args, Subcommand};

use crate::config::loader::ConfigLoader;
use crate::error::KitResult;

/// Arguments for the `deploy` command.
#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    #[command(subcommand)]
    pub subcommand: DeploySubcommand,
}

/// Deploy subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum DeploySubcommand {
    /// Updates a manifest repository with a new image.
    ///
    /// Wraps `kustomize edit set image`:
    /// 1. The manifest repository is cloned, or pulled when --directory is used.
    /// 2. `kustomize edit set image <service>=<image>` runs in the service directory.
    /// 3. The change is committed.
    /// 4. A rebase/push loop with backoff runs until the push succeeds.
    Kustomize(KustomizeArgs),
}

/// Arguments for `deploy kustomize`.
#[derive(Debug, Clone, Default, Args)]
pub struct KustomizeArgs {
    /// The directory of an existing repository.
    #[arg(short = 'd', long, value_name = "DIR")]
    pub directory: Option<String>,

    /// The URL of a repository to clone.
    #[arg(short = 'r', long, value_name = "URL")]
    pub repository: Option<String>,

    /// The destination service for the kustomize command.
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// The container image name to use in the kustomize command.
    #[arg(short = 'i', long)]
    pub image: Option<String>,

    /// Override the default git commit message (IMAGE, SERVICE and SDIR are replaced).
    #[arg(short = 'm', long)]
    pub message: Option<String>,

    /// The sub-directory (or environment) where the target kustomization.yaml file is located.
    #[arg(short = 'e', long = "service-directory", value_name = "SDIR")]
    pub service_directory: Option<String>,

    /// Do the update but do not push the commit.
    #[arg(long = "skip-push")]
    pub skip_push: bool,

    /// Number of git push retry attempts.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub attempts: Option<i64>,

    /// The algorithm used to determine how long to wait before retry [exponential|random].
    #[arg(long = "backoff-method", value_name = "METHOD")]
    pub backoff_method: Option<String>,

    /// Milliseconds in one backoff unit.
    #[arg(long = "time-unit-ms", value_name = "MS")]
    pub time_unit_ms: Option<u64>,
}

impl KustomizeArgs {
    /// Applies the given flags as the highest-priority configuration source.
    ///
    /// Empty string flags are ignored so they never mask lower sources.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be recorded.
    pub fn apply_overrides(&self, loader: ConfigLoader) -> KitResult<ConfigLoader> {
        let mut loader = loader
            .set_if_present("directory", self.directory.as_deref())?
            .set_if_present("repository", self.repository.as_deref())?
            .set_if_present("service", self.service.as_deref())?
            .set_if_present("image", self.image.as_deref())?
            .set_if_present("message", self.message.as_deref())?
            .set_if_present("service_directory", self.service_directory.as_deref())?
            .set_if_present("backoff_method", self.backoff_method.as_deref())?;

        if self.skip_push {
            loader = loader.set("skip_push", true)?;
        }
        if let Some(attempts) = self.attempts {
            loader = loader.set("attempts", attempts)?;
        }
        if let Some(time_unit_ms) = self.time_unit_ms {
            loader = loader.set("time_unit_ms", time_unit_ms)?;
        }
        Ok(loader)
    }
}
