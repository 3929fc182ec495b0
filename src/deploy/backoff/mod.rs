// deploykit-rs: GitOps DeployKit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wait sequences between failed push attempts.
//!
//! ```text
//! Exponential { base }   1, base, base^2, ...   (saturating)
//! Random { max, rng }    uniform in [1, max], drawn per entry
//!
//! sequence(n)[i] = units to wait after failed attempt i + 1
//! wait = time_unit * units
//! ```


use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::error::ConfigError;

/// Base of the exponential strategy used by the workflow.
pub const DEFAULT_EXPONENTIAL_BASE: u64 = 2;

/// Upper bound (inclusive) of the random strategy used by the workflow.
pub const DEFAULT_RANDOM_MAX: u64 = 5;

/// Backoff method named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackoffMethod {
    Exponential,
    #[default]
    Random,
}

impl BackoffMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exponential => "exponential",
            Self::Random => "random",
        }
    }

    /// Parses a configured name, falling back to [`BackoffMethod::Exponential`].
    ///
    /// Names are trimmed and compared case-insensitively. An unknown name is
    /// not an error; it is logged and replaced by the exponential method.
    #[must_use]
    pub fn from_name_or_fallback(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(
                backoff_method = %name,
                fallback = Self::Exponential.as_str(),
                "unknown backoff method"
            );
            Self::Exponential
        })
    }
}

impl fmt::Display for BackoffMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackoffMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exponential" => Ok(Self::Exponential),
            "random" => Ok(Self::Random),
            _ => Err(ConfigError::InvalidValue {
                key: "backoff_method".to_string(),
                message: format!("expected 'exponential' or 'random', got '{s}'"),
            }),
        }
    }
}

/// Produces the per-attempt wait counts for the push loop.
#[derive(Debug, Clone)]
pub enum BackoffStrategy {
    /// `base^i` for attempt index `i`.
    Exponential { base: u64 },
    /// Independent draws in `[1, max]` from an injected generator.
    Random { max: u64, rng: StdRng },
}

impl BackoffStrategy {
    #[must_use]
    pub const fn exponential(base: u64) -> Self {
        Self::Exponential { base }
    }

    /// Random strategy over `[1, max]`; a `max` of 0 is treated as 1.
    #[must_use]
    pub fn random(max: u64, rng: StdRng) -> Self {
        Self::Random {
            max: max.max(1),
            rng,
        }
    }

    /// Random strategy seeded from the operating system.
    #[must_use]
    pub fn random_from_entropy(max: u64) -> Self {
        Self::random(max, StdRng::from_os_rng())
    }

    /// Strategy used by the workflow for a configured method.
    #[must_use]
    pub fn for_method(method: BackoffMethod) -> Self {
        match method {
            BackoffMethod::Exponential => Self::exponential(DEFAULT_EXPONENTIAL_BASE),
            BackoffMethod::Random => Self::random_from_entropy(DEFAULT_RANDOM_MAX),
        }
    }

    /// Wait count after the failed attempt at 0-based `index`.
    ///
    /// Random draws advance the generator, so call this once per index in
    /// ascending order to reproduce [`sequence`](Self::sequence).
    pub fn units(&mut self, index: usize) -> u64 {
        match self {
            Self::Exponential { base } => {
                base.saturating_pow(u32::try_from(index).unwrap_or(u32::MAX))
            }
            Self::Random { max, rng } => rng.random_range(1..=*max),
        }
    }

    /// Generates `n` wait counts.
    ///
    /// Exponential entries saturate at `u64::MAX` instead of overflowing.
    pub fn sequence(&mut self, n: usize) -> Vec<u64> {
        (0..n).map(|index| self.units(index)).collect()
    }
}

/// Wall-clock wait for `units` multiples of `time_unit`, saturating at [`Duration::MAX`].
#[must_use]
pub fn wait_duration(time_unit: Duration, units: u64) -> Duration {
    if time_unit.is_zero() {
        return Duration::ZERO;
    }
    u32::try_from(units)
        .ok()
        .and_then(|units| time_unit.checked_mul(units))
        .unwrap_or(Duration::MAX)
}
