// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit message templates.

use anyhow::Context;
use regex::{Captures, Regex};

use crate::error::Result;

/// Template used when no message is configured.
pub const DEFAULT_MESSAGE: &str = "deploykit: push IMAGE to SERVICE in SDIR";

/// Replaces `IMAGE`, `SERVICE` and `SDIR` in `template`.
///
/// Substitution is a single left-to-right pass, so a value that itself
/// contains a placeholder word is inserted verbatim.
///
/// # Errors
///
/// Returns an error if the placeholder pattern fails to compile.
pub fn render_message(
    template: &str,
    image: &str,
    service: &str,
    service_directory: &str,
) -> Result<String> {
    let placeholders =
        Regex::new("IMAGE|SERVICE|SDIR").context("failed to compile placeholder regex")?;

    let rendered = placeholders.replace_all(template, |caps: &Captures<'_>| match &caps[0] {
        "IMAGE" => image,
        "SERVICE" => service,
        _ => service_directory,
    });
    Ok(rendered.into_owned())
}
