// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! ```text
//! --config FILE      ← extra TOML file (after deploykit.toml)
//! --log-level N      ← console verbosity (0-5)
//! --file-log-level N ← file verbosity (defaults to --log-level)
//! --log-file FILE    ← also log to FILE
//! --no-timestamps    ← plain console lines
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::logging::{LogConfig, LogLevel};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to a TOML configuration file, loaded after `deploykit.toml`.
    #[arg(long = "config", value_name = "FILE", env = "DK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=5),
        global = true
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(
        long = "file-log-level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(0..=5),
        global = true
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Omits timestamps from console output.
    #[arg(long = "no-timestamps", global = true)]
    pub no_timestamps: bool,
}

impl GlobalOptions {
    /// Logging setup for these options.
    ///
    /// The file level falls back to the console level.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        let console_level = self
            .log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(LogLevel::INFO);

        let file_level = self
            .file_log_level
            .and_then(LogLevel::from_u8)
            .unwrap_or(console_level);

        LogConfig::builder()
            .with_console_level(console_level)
            .with_file_level(file_level)
            .maybe_with_log_file(self.log_file.as_ref().map(|p| p.display().to_string()))
            .with_show_timestamps(!self.no_timestamps)
            .build()
    }
}
