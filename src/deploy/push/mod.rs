// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rebase/push retry loop.
//!
//! ```text
//! attempts = max(attempts, 1)
//!
//! for n in 1..=attempts:
//!     pull_rebase()  --fail--> return error (no retry)
//!     push()         --ok----> return n
//!     sleep(time_unit * strategy.units(n - 1))   (skipped after the last attempt)
//!
//! return PushExhausted { attempts }
//! ```


use std::time::Duration;

use futures_util::future::BoxFuture;
use tracing::{info, warn};

use super::backoff::{BackoffStrategy, wait_duration};
use crate::error::{GitError, KitResult};

/// Capability needed by [`rebase_push_loop`].
pub trait RebasePush: Send {
    /// Brings the local branch up to date by rebasing onto the remote.
    fn pull_rebase(&mut self) -> BoxFuture<'_, KitResult<()>>;

    /// Publishes the local commits.
    fn push(&mut self) -> BoxFuture<'_, KitResult<()>>;
}

/// Clamps a configured attempt count to at least one.
#[must_use]
pub fn coerce_attempts(attempts: i64) -> usize {
    if attempts < 1 {
        warn!(attempts, "attempts must be at least 1, using 1");
        return 1;
    }
    usize::try_from(attempts).unwrap_or(usize::MAX)
}

/// Pulls with rebase and pushes until a push succeeds.
///
/// Returns the attempt number that pushed. A failed pull is returned at once,
/// since a rebase conflict will not resolve itself between attempts.
///
/// # Errors
///
/// Returns the pull error as-is, or [`GitError::PushExhausted`] when every
/// push failed.
pub async fn rebase_push_loop<R>(
    repo: &mut R,
    attempts: i64,
    time_unit: Duration,
    strategy: &mut BackoffStrategy,
) -> KitResult<usize>
where
    R: RebasePush + ?Sized,
{
    let attempts = coerce_attempts(attempts);
    info!(
        attempts,
        time_unit_ms = time_unit.as_millis(),
        "git rebase and push loop"
    );

    // Waits are drawn per failure so a huge attempt budget allocates nothing.
    for index in 0..attempts {
        let attempt = index + 1;

        repo.pull_rebase().await?;

        let error = match repo.push().await {
            Ok(()) => {
                info!(attempt, "push succeeded");
                return Ok(attempt);
            }
            Err(e) => e,
        };

        if attempt == attempts {
            warn!(attempt, error = %error, "final push attempt failed");
            break;
        }

        let wait = wait_duration(time_unit, strategy.units(index));
        warn!(
            attempt,
            attempts,
            wait_ms = wait.as_millis(),
            error = %error,
            "push failed, retrying"
        );
        tokio::time::sleep(wait).await;
    }

    Err(GitError::PushExhausted { attempts }.into())
}
