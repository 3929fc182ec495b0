// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `deploy kustomize` workflow.
//!
//! ```text
//! directory set?  --yes--> cd <directory>; git pull --rebase
//!      | no
//! repository set? --yes--> mktemp gdk-*; git clone <repository> <tmp>
//!      | no
//!      v
//!   MissingSource
//!
//! cd <checkout>/<service_directory>; kustomize edit set image <service>=<image>
//! cd <checkout>;                     git commit --all --message <message>
//! skip_push? --yes--> done (temporary clone kept)
//! rebase_push_loop(shell, attempts, time_unit, strategy)
//! ```


use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use bon::Builder;
use tempfile::TempDir;
use tracing::info;

use super::backoff::{BackoffMethod, BackoffStrategy};
use super::push::rebase_push_loop;
use crate::config::Config;
use crate::error::{ConfigError, KitResult};
use crate::shell::Shell;

/// Prefix of temporary clone directories.
pub const CLONE_PREFIX: &str = "gdk-";

/// Resolved inputs of one workflow run.
#[derive(Debug, Clone, Builder)]
pub struct DeployConfig {
    #[builder(into)]
    directory: Option<PathBuf>,
    #[builder(into)]
    repository: Option<String>,
    #[builder(into)]
    service: String,
    #[builder(into)]
    image: String,
    #[builder(into, default)]
    service_directory: PathBuf,
    #[builder(into)]
    message: String,
    #[builder(default)]
    skip_push: bool,
    #[builder(default = 1)]
    attempts: i64,
    #[builder(default = Duration::from_secs(1))]
    time_unit: Duration,
}

impl DeployConfig {
    /// Builds the workflow inputs from a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error if the commit message cannot be rendered.
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        Ok(Self::builder()
            .maybe_directory(config.directory())
            .maybe_repository(config.repository())
            .service(&config.service)
            .image(&config.image)
            .service_directory(&config.service_directory)
            .message(config.commit_message()?)
            .skip_push(config.skip_push)
            .attempts(config.attempts)
            .time_unit(config.time_unit())
            .build())
    }

    fn image_assignment(&self) -> String {
        format!("{}={}", self.service, self.image)
    }
}

/// Where the manifests were checked out.
#[derive(Debug)]
enum Checkout {
    Existing(PathBuf),
    Cloned(TempDir),
}

impl Checkout {
    fn path(&self) -> &Path {
        match self {
            Self::Existing(path) => path,
            Self::Cloned(dir) => dir.path(),
        }
    }
}

/// Result of a successful workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Checkout root. A temporary clone no longer exists unless the push was skipped.
    pub checkout: PathBuf,
    /// Whether the checkout was a temporary clone.
    pub cloned: bool,
    /// Attempt that pushed; `None` when the push was skipped.
    pub pushed_on: Option<usize>,
}

/// Runs the workflow with the strategy named by `backoff_method`.
///
/// # Errors
///
/// See [`deploy_with_strategy`].
pub async fn deploy(
    config: &DeployConfig,
    shell: &mut Shell,
    backoff_method: &str,
) -> KitResult<DeployOutcome> {
    let method = BackoffMethod::from_name_or_fallback(backoff_method);
    let mut strategy = BackoffStrategy::for_method(method);
    deploy_with_strategy(config, shell, &mut strategy).await
}

/// Runs the workflow with an explicit backoff strategy.
///
/// # Errors
///
/// Returns [`ConfigError::MissingSource`] without a directory or repository,
/// otherwise the first failing step's error: pull, clone, edit and commit
/// failures stop the workflow, and the push loop reports exhaustion.
pub async fn deploy_with_strategy(
    config: &DeployConfig,
    shell: &mut Shell,
    strategy: &mut BackoffStrategy,
) -> KitResult<DeployOutcome> {
    let relative = checkout_relative(&config.service_directory)?;
    let checkout = prepare_checkout(config, shell).await?;
    let root = checkout.path().to_path_buf();

    let service_dir = if relative.as_os_str().is_empty() {
        root.clone()
    } else {
        root.join(relative)
    };
    shell.set_dir(&service_dir);
    shell.kustomize_edit(&config.image_assignment()).await?;

    shell.set_dir(&root);
    shell.git_commit_all(&config.message).await?;

    let cloned = matches!(checkout, Checkout::Cloned(_));

    if config.skip_push {
        if let Checkout::Cloned(dir) = checkout {
            let kept = dir.keep();
            info!(checkout = %kept.display(), "push skipped, temporary clone kept");
        } else {
            info!(checkout = %root.display(), "push skipped");
        }
        return Ok(DeployOutcome {
            checkout: root,
            cloned,
            pushed_on: None,
        });
    }

    let pushed_on = rebase_push_loop(shell, config.attempts, config.time_unit, strategy).await?;
    info!(
        checkout = %root.display(),
        image = %config.image,
        service = %config.service,
        attempt = pushed_on,
        "deployed"
    );

    Ok(DeployOutcome {
        checkout: root,
        cloned,
        pushed_on: Some(pushed_on),
    })
}

/// Service directory below the checkout root.
///
/// A leading `/` (or drive prefix) is dropped so `-e /overlays/prod` stays
/// inside the checkout. `..` is rejected.
fn checkout_relative(service_directory: &Path) -> KitResult<PathBuf> {
    let mut relative = PathBuf::new();
    for component in service_directory.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                return Err(ConfigError::InvalidValue {
                    key: "service_directory".to_string(),
                    message: format!(
                        "'{}' leaves the repository checkout",
                        service_directory.display()
                    ),
                }
                .into());
            }
        }
    }
    Ok(relative)
}

async fn prepare_checkout(config: &DeployConfig, shell: &mut Shell) -> KitResult<Checkout> {
    if let Some(directory) = &config.directory {
        shell.set_dir(directory);
        shell.git_pull_rebase().await?;
        return Ok(Checkout::Existing(directory.clone()));
    }

    if let Some(repository) = &config.repository {
        let dir = tempfile::Builder::new().prefix(CLONE_PREFIX).tempdir()?;
        info!(repository = %repository, destination = %dir.path().display(), "cloning");
        shell.git_clone(repository, dir.path()).await?;
        return Ok(Checkout::Cloned(dir));
    }

    Err(ConfigError::MissingSource.into())
}
