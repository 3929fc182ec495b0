// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata for every user-facing configuration field.
//!
//! One table drives the `print-config` documentation and the `print-action`
//! descriptor, so the two never drift from each other.

use crate::deploy::message::DEFAULT_MESSAGE;

/// Whether a field must be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Always required.
    Required,
    /// One field of the group is required (`directory` or `repository`).
    OneOf,
    Optional,
}

impl Requirement {
    /// Marker used in the documentation table.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Required => "Y",
            Self::OneOf => "Y*",
            Self::Optional => "",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Required | Self::OneOf)
    }
}

/// Description of one configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Display name.
    pub name: &'static str,
    /// Config key, also used as the action input name.
    pub key: &'static str,
    pub field_type: &'static str,
    pub default: &'static str,
    /// Long flag without dashes.
    pub flag: &'static str,
    pub short: Option<char>,
    pub env: &'static str,
    pub requirement: Requirement,
    pub usage: &'static str,
}

pub static FIELDS: [FieldMeta; 10] = [
    FieldMeta {
        name: "Directory",
        key: "directory",
        field_type: "string",
        default: "",
        flag: "directory",
        short: Some('d'),
        env: "DK_DIRECTORY",
        requirement: Requirement::OneOf,
        usage: "The directory of an existing repository",
    },
    FieldMeta {
        name: "Repository",
        key: "repository",
        field_type: "string",
        default: "",
        flag: "repository",
        short: Some('r'),
        env: "DK_REPOSITORY",
        requirement: Requirement::OneOf,
        usage: "The URL of a repository to clone",
    },
    FieldMeta {
        name: "Service",
        key: "service",
        field_type: "string",
        default: "",
        flag: "service",
        short: Some('s'),
        env: "DK_SERVICE",
        requirement: Requirement::Required,
        usage: "The destination service for the kustomize command",
    },
    FieldMeta {
        name: "Image",
        key: "image",
        field_type: "string",
        default: "",
        flag: "image",
        short: Some('i'),
        env: "DK_IMAGE",
        requirement: Requirement::Required,
        usage: "The container image name to use in the kustomize command",
    },
    FieldMeta {
        name: "Message",
        key: "message",
        field_type: "string",
        default: DEFAULT_MESSAGE,
        flag: "message",
        short: Some('m'),
        env: "DK_MESSAGE",
        requirement: Requirement::Optional,
        usage: "Override the default git commit message",
    },
    FieldMeta {
        name: "ServiceDirectory",
        key: "service_directory",
        field_type: "string",
        default: "",
        flag: "service-directory",
        short: Some('e'),
        env: "DK_SERVICE_DIRECTORY",
        requirement: Requirement::Optional,
        usage: "The sub-directory (or environment) where the target kustomization.yaml file is located",
    },
    FieldMeta {
        name: "SkipPush",
        key: "skip_push",
        field_type: "bool",
        default: "false",
        flag: "skip-push",
        short: None,
        env: "DK_SKIP_PUSH",
        requirement: Requirement::Optional,
        usage: "Do the update but do not push the commit",
    },
    FieldMeta {
        name: "Attempts",
        key: "attempts",
        field_type: "int",
        default: "3",
        flag: "attempts",
        short: None,
        env: "DK_ATTEMPTS",
        requirement: Requirement::Optional,
        usage: "Number of git push retry attempts",
    },
    FieldMeta {
        name: "BackoffMethod",
        key: "backoff_method",
        field_type: "string",
        default: "random",
        flag: "backoff-method",
        short: None,
        env: "DK_BACKOFF_METHOD",
        requirement: Requirement::Optional,
        usage: "The algorithm used to determine how long to wait before retry [exponential|random]",
    },
    FieldMeta {
        name: "TimeUnitMs",
        key: "time_unit_ms",
        field_type: "int",
        default: "1000",
        flag: "time-unit-ms",
        short: None,
        env: "DK_TIME_UNIT_MS",
        requirement: Requirement::Optional,
        usage: "Milliseconds in one backoff unit",
    },
];

/// Looks up a field by config key.
#[must_use]
pub fn field(key: &str) -> Option<&'static FieldMeta> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Renders the fields as a markdown table.
#[must_use]
pub fn markdown_table(fields: &[FieldMeta]) -> String {
    let header = [
        "Name",
        "Field Type",
        "Default",
        "Flag Name",
        "Env Variable Key",
        "Required",
    ];
    let rows: Vec<[&str; 6]> = fields
        .iter()
        .map(|f| {
            [
                f.name,
                f.field_type,
                f.default,
                f.flag,
                f.env,
                f.requirement.marker(),
            ]
        })
        .collect();

    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let render_row = |cells: &[&str; 6]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!(" {cell:<width$} "))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(&header));
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
    lines.push(format!("|{}|", separator.join("|")));
    lines.extend(rows.iter().map(render_row));
    lines.join("\n")
}
