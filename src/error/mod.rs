// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            KitError (~24 bytes)
//!                   |
//!   +-------+-------+-------+-------+------+
//!   |       |       |       |       |      |
//!   v       v       v       v       v      v
//!  Cfg    Proc     Git   Manifest  Io   Other
//!  Box    Box      Box     Box     Box  Box<str>
//!
//! Sub-errors:
//!   Config   MissingSource, MissingKey, InvalidValue, ParseError
//!   Process  ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Git      CloneFailed, PullFailed, CommitFailed, PushFailed, PushExhausted
//!   Manifest EditFailed
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`KitError`].
pub type KitResult<T> = std::result::Result<T, KitError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum KitError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Manifest edit failed.
    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl KitError {
    /// Create a [`KitError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for KitError {
                fn from(err: $error) -> Self {
                    KitError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    GitError => Git,
    ManifestError => Manifest,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither an existing checkout nor a repository URL was given.
    #[error("need an existing repository directory or a repository url to clone")]
    MissingSource,

    /// Missing required configuration key.
    #[error("missing required config key '{key}'")]
    MissingKey { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to load or deserialize configuration sources.
    #[error("failed to load configuration: {message}")]
    ParseError { message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Failed while waiting on the process.
    #[error("failed to wait for process '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Clone operation failed.
    #[error("failed to clone {url} into {dest}")]
    CloneFailed {
        url: String,
        dest: String,
        #[source]
        source: ProcessError,
    },

    /// `git pull --rebase` failed; usually a conflict that needs a human.
    #[error("pull with rebase failed in {path}")]
    PullFailed {
        path: String,
        #[source]
        source: ProcessError,
    },

    /// `git commit` failed.
    #[error("commit failed in {path}")]
    CommitFailed {
        path: String,
        #[source]
        source: ProcessError,
    },

    /// A single `git push` failed.
    #[error("push failed in {path}")]
    PushFailed {
        path: String,
        #[source]
        source: ProcessError,
    },

    /// Every attempt of the rebase/push loop failed to push.
    #[error("all {attempts} push attempts failed")]
    PushExhausted { attempts: usize },
}

// --- Manifest Errors ---

/// Manifest edit errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// `kustomize edit set image` failed.
    #[error("kustomize edit set image {assignment} failed in {path}")]
    EditFailed {
        assignment: String,
        path: String,
        #[source]
        source: ProcessError,
    },
}
