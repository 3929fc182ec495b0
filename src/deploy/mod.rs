// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment workflows.
//!
//! ```text
//! kustomize::deploy(DeployConfig, Shell, method)
//!      |
//!      +--> checkout (pull | clone)
//!      +--> kustomize edit, git commit
//!      v
//! push::rebase_push_loop(&mut impl RebasePush, attempts, time_unit, strategy)
//!      |
//!      v
//! backoff::BackoffStrategy::sequence(attempts)
//!
//! message   commit message templates
//! action    GitHub Action descriptor
//! ```

pub mod action;
pub mod backoff;
pub mod kustomize;
pub mod message;
pub mod push;
