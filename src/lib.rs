// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        version / print-* / deploy
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML, DK_* env, flags    |
//!              '-------------+-------------'
//!                            v
//!                         deploy
//!            kustomize workflow, push loop,
//!            backoff, message, action
//!                            |
//!                            v
//!                          shell
//!                    git / kustomize
//!
//!   +-----------------------------------------+
//!   |  core   process                         |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod shell;
