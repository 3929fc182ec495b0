// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub Action descriptor for the CLI.
//!
//! ```text
//! name, description
//! inputs:  <input name> -> { description, default?, required? }
//! runs:    { using: docker, image: Dockerfile, env: { DK_X: ${{ inputs.x }} } }
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::fields::{FIELDS, FieldMeta};

pub const ACTION_NAME: &str = "GitOps Deploykit";
pub const ACTION_DESCRIPTION: &str = "GitOps Style Manifest update with Kustomize";

/// Top-level `action.yml` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitHubAction {
    pub name: String,
    pub description: String,
    pub inputs: BTreeMap<String, ActionInput>,
    pub runs: ActionRuns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionInput {
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRuns {
    pub using: String,
    pub image: String,
    pub env: BTreeMap<String, String>,
}

impl GitHubAction {
    /// Builds the descriptor with one input per configuration field.
    #[must_use]
    pub fn from_fields(fields: &[FieldMeta]) -> Self {
        let mut inputs = BTreeMap::new();
        let mut env = BTreeMap::new();

        for field in fields {
            inputs.insert(
                field.key.to_string(),
                ActionInput {
                    description: field.usage.to_string(),
                    default: field.default.to_string(),
                    required: field.requirement.is_required(),
                },
            );
            env.insert(
                field.env.to_string(),
                format!("${{{{ inputs.{} }}}}", field.key),
            );
        }

        Self {
            name: ACTION_NAME.to_string(),
            description: ACTION_DESCRIPTION.to_string(),
            inputs,
            runs: ActionRuns {
                using: "docker".to_string(),
                image: "Dockerfile".to_string(),
                env,
            },
        }
    }

    /// Serializes the descriptor as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(self)
    }
}

impl Default for GitHubAction {
    fn default() -> Self {
        Self::from_fields(&FIELDS)
    }
}
