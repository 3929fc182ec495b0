// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deploy command implementation for deploykit.

use anyhow::Context;
use tracing::{debug, info};

use crate::cli::deploy::{DeployArgs, DeploySubcommand, KustomizeArgs};
use crate::cli::global::GlobalOptions;
use crate::cmd::config::config_loader;
use crate::deploy::kustomize::{DeployConfig, deploy};
use crate::error::Result;
use crate::shell::Shell;

/// Main handler for the deploy command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or any workflow step fails.
pub async fn run_deploy_command(args: &DeployArgs, global: &GlobalOptions) -> Result<()> {
    match &args.subcommand {
        DeploySubcommand::Kustomize(kustomize) => run_kustomize_command(kustomize, global).await,
    }
}

async fn run_kustomize_command(args: &KustomizeArgs, global: &GlobalOptions) -> Result<()> {
    let config = args
        .apply_overrides(config_loader(global))?
        .build()
        .context("invalid deploy configuration")?;
    for line in config.format_options() {
        debug!(option = %line, "config");
    }

    let deploy_config = DeployConfig::from_config(&config)?;
    let mut shell = Shell::from_tools(&config.tools);

    let outcome = deploy(&deploy_config, &mut shell, &config.backoff_method)
        .await
        .with_context(|| format!("failed to deploy {}", config.image_assignment()))?;

    match outcome.pushed_on {
        Some(attempt) => info!(
            image = %config.image,
            service = %config.service,
            attempt,
            "manifest updated and pushed"
        ),
        None => info!(
            image = %config.image,
            service = %config.service,
            checkout = %outcome.checkout.display(),
            "manifest updated, push skipped"
        ),
    }
    Ok(())
}
