// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for deploykit using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! deploykit [global options] <command>
//! version
//! options
//! print-config
//! print-action
//! deploy kustomize [flags]
//! ```

pub mod deploy;
pub mod global;


use crate::cli::deploy::DeployArgs;
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// GitOps DeployKit
///
/// A utility for common GitOps tasks.
#[derive(Debug, Parser)]
#[command(
    name = "deploykit",
    author,
    version,
    about = "GitOps DeployKit - A utility for common GitOps tasks",
    long_about = "deploykit-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  GitOps DeployKit - A utility for common GitOps tasks.\n\n\
                  Invoking `deploykit deploy kustomize -d manifests -s api -i api:1.0`\n\
                  points the `api` image of an existing manifest checkout at\n\
                  `api:1.0`, commits and pushes. See `deploykit <command> --help`\n\
                  for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from `deploykit.toml` in the current directory\n\
                  when present, then from --config, then from DK_* environment\n\
                  variables, and finally from command-line flags. Run\n\
                  `deploykit print-config` for the list of fields."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Version and build information.
    Version,

    /// Lists all options and their merged values.
    Options,

    /// Outputs the config table in markdown format, used for documentation.
    #[command(name = "print-config")]
    PrintConfig,

    /// Outputs the GitHub Action for this CLI.
    #[command(name = "print-action")]
    PrintAction,

    /// Deploys using one of the supported methods/tools.
    Deploy(DeployArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
