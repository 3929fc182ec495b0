// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for deploykit.

use anyhow::Context;

use crate::cli::global::GlobalOptions;
use crate::config::fields::{FIELDS, markdown_table};
use crate::config::loader::ConfigLoader;
use crate::deploy::action::GitHubAction;
use crate::error::Result;

/// Configuration file picked up from the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "deploykit.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "DK";

/// Loader for every source below the command-line flags.
#[must_use]
pub fn config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    if let Some(path) = &global.config {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

/// Display the merged configuration and the files it came from.
///
/// # Errors
///
/// Returns an error if a configuration source cannot be read.
pub fn run_options_command(global: &GlobalOptions) -> Result<()> {
    let loader = config_loader(global);
    let files = loader.format_loaded_files();
    let config = loader.build_unvalidated()?;

    for line in config.format_options() {
        println!("{line}");
    }
    println!();
    if files.is_empty() {
        println!("No configuration files loaded");
    } else {
        for line in files {
            println!("{line}");
        }
    }
    Ok(())
}

/// Print the configuration fields as a markdown table.
pub fn run_print_config_command() {
    println!("{}", markdown_table(&FIELDS));
}

/// Print the GitHub Action descriptor.
///
/// # Errors
///
/// Returns an error if the descriptor cannot be serialized.
pub fn run_print_action_command() -> Result<()> {
    let yaml = GitHubAction::from_fields(&FIELDS)
        .to_yaml()
        .context("failed to encode action descriptor")?;
    print!("{yaml}");
    Ok(())
}
