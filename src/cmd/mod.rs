// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, print-config, print-action), deploy, version
//! ```

pub mod config;
pub mod deploy;
pub mod version;

#[cfg(test)]
mod tests;
