// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Version | Options | PrintConfig | PrintAction | Deploy
//! ```

use std::process::ExitCode;

use deploykit_rs::cli::{self, Command};
use deploykit_rs::cmd::config::{
    run_options_command, run_print_action_command, run_print_config_command,
};
use deploykit_rs::cmd::deploy::run_deploy_command;
use deploykit_rs::cmd::version::run_version_command;
use deploykit_rs::logging::init_logging;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let _log_guard = match init_logging(&cli.global.log_config()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            run_version_command();
            Ok(())
        }
        Some(Command::Options) => run_options_command(&cli.global),
        Some(Command::PrintConfig) => {
            run_print_config_command();
            Ok(())
        }
        Some(Command::PrintAction) => run_print_action_command(),
        Some(Command::Deploy(args)) => run_deploy_command(args, &cli.global).await,
        None => Err(anyhow::anyhow!(
            "no command specified, use --help for usage information"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
