// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process runner for the external tools of a deployment.
//!
//! ```text
//! Shell { dir, stdout, stderr, git, kustomize }
//!   run(program, args) --> ProcessBuilder --> child in `dir`
//!
//!   git_pull_rebase   git pull --rebase
//!   git_commit_all    git commit --all --message <msg>
//!   git_push          git push
//!   git_clone         git clone <repository> <destination>
//!   kustomize_edit    kustomize edit set image <service>=<image>
//! ```
//!
//! One `Shell` lives for the whole workflow; its working directory is moved
//! between the checkout root and the service sub-directory as needed.

use bon::Builder;
use futures_util::future::BoxFuture;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::ToolsConfig;
use crate::core::process::builder::{ProcessBuilder, StreamFlags};
use crate::deploy::push::RebasePush;
use crate::error::{GitError, KitResult, ManifestError, ProcessError};

/// Runs external commands in a mutable working directory.
#[derive(Debug, Clone, Builder)]
pub struct Shell {
    /// Working directory; `None` runs in the current directory.
    #[builder(setters(name = with_dir), into)]
    dir: Option<PathBuf>,
    #[builder(setters(name = with_stdout), default = StreamFlags::INHERIT)]
    stdout: StreamFlags,
    /// Logged at debug and kept, so a failing tool's stderr reaches the error log.
    #[builder(
        setters(name = with_stderr),
        default = StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING
    )]
    stderr: StreamFlags,
    #[builder(setters(name = with_git), into, default = PathBuf::from("git"))]
    git: PathBuf,
    #[builder(setters(name = with_kustomize), into, default = PathBuf::from("kustomize"))]
    kustomize: PathBuf,
}

impl Default for Shell {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Shell {
    /// Creates a shell using the executables configured in `[tools]`.
    #[must_use]
    pub fn from_tools(tools: &ToolsConfig) -> Self {
        Self::builder()
            .with_git(tools.git.clone())
            .with_kustomize(tools.kustomize.clone())
            .build()
    }

    /// Moves the working directory used by subsequent commands.
    pub fn set_dir(&mut self, dir: impl AsRef<Path>) {
        self.dir = Some(dir.as_ref().to_path_buf());
    }

    /// Returns the current working directory, if one was set.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn dir_display(&self) -> String {
        self.dir
            .as_ref()
            .map_or_else(|| ".".to_string(), |d| d.display().to_string())
    }

    fn command(&self, program: &Path) -> ProcessBuilder {
        let mut builder = ProcessBuilder::new(program)
            .stdout_flags(self.stdout)
            .stderr_flags(self.stderr);
        if let Some(dir) = &self.dir {
            builder = builder.cwd(dir);
        }
        builder
    }

    /// Runs `program` with `args` in the shell's working directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] if the program cannot be started or exits
    /// with a non-zero status.
    pub async fn run<I, S>(&self, program: impl AsRef<Path>, args: I) -> Result<(), ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.execute(self.command(program.as_ref()).args(args)).await
    }

    async fn execute(&self, builder: ProcessBuilder) -> Result<(), ProcessError> {
        info!(
            command = %builder.command_line(),
            working_directory = %self.dir_display(),
            "run"
        );
        builder.run().await.map(|_| ())
    }

    /// Runs git without ever prompting for credentials.
    async fn git<I, S>(&self, args: I) -> Result<(), ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let builder = self
            .command(&self.git)
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never");
        self.execute(builder).await
    }

    /// `git pull --rebase`
    ///
    /// # Errors
    ///
    /// Returns [`GitError::PullFailed`] if the pull or the rebase fails.
    pub async fn git_pull_rebase(&self) -> KitResult<()> {
        self.git(["pull", "--rebase"])
            .await
            .map_err(|source| GitError::PullFailed {
                path: self.dir_display(),
                source,
            })?;
        Ok(())
    }

    /// `git commit --all --message <message>`
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CommitFailed`], including when there is nothing to commit.
    pub async fn git_commit_all(&self, message: &str) -> KitResult<()> {
        self.git(["commit", "--all", "--message", message])
            .await
            .map_err(|source| GitError::CommitFailed {
                path: self.dir_display(),
                source,
            })?;
        Ok(())
    }

    /// `git push`
    ///
    /// # Errors
    ///
    /// Returns [`GitError::PushFailed`] if the remote rejects the push.
    pub async fn git_push(&self) -> KitResult<()> {
        self.git(["push"])
            .await
            .map_err(|source| GitError::PushFailed {
                path: self.dir_display(),
                source,
            })?;
        Ok(())
    }

    /// `git clone <repository> <destination>`
    ///
    /// # Errors
    ///
    /// Returns [`GitError::CloneFailed`] if the clone fails.
    pub async fn git_clone(&self, repository: &str, destination: &Path) -> KitResult<()> {
        self.git([OsStr::new("clone"), OsStr::new(repository), destination.as_os_str()])
            .await
            .map_err(|source| GitError::CloneFailed {
                url: repository.to_string(),
                dest: destination.display().to_string(),
                source,
            })?;
        Ok(())
    }

    /// `kustomize edit set image <assignment>`, where `assignment` is
    /// `<service>=<image>`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::EditFailed`] if kustomize fails.
    pub async fn kustomize_edit(&self, assignment: &str) -> KitResult<()> {
        self.run(&self.kustomize, ["edit", "set", "image", assignment])
            .await
            .map_err(|source| ManifestError::EditFailed {
                assignment: assignment.to_string(),
                path: self.dir_display(),
                source,
            })?;
        Ok(())
    }
}

impl RebasePush for Shell {
    fn pull_rebase(&mut self) -> BoxFuture<'_, KitResult<()>> {
        Box::pin(self.git_pull_rebase())
    }

    fn push(&mut self) -> BoxFuture<'_, KitResult<()>> {
        Box::pin(self.git_push())
    }
}
