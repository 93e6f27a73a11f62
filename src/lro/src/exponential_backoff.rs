// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Truncated exponential backoff, without jitter.
//!
//! This module provides the implementation of [PollingBackoffPolicy] used by
//! default in the poller.
//!
//! [PollingBackoffPolicy]: crate::polling_backoff_policy::PollingBackoffPolicy

use crate::polling_state::PollingState;
use std::time::Duration;

/// The error type for exponential backoff creation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum BuildError {
    #[error("the scaling value ({0}) should be >= 1.0")]
    InvalidScalingFactor(f64),
    #[error("the initial delay ({0:?}) should be greater than zero")]
    InvalidInitialDelay(Duration),
    #[error(
        "the maximum delay ({maximum:?}) should be greater than or equal to the initial delay ({initial:?})"
    )]
    EmptyRange {
        maximum: Duration,
        initial: Duration,
    },
}

/// Builds [ExponentialBackoff] policies.
#[derive(Clone, Debug)]
pub struct ExponentialBackoffBuilder {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl ExponentialBackoffBuilder {
    /// Creates a builder with the default parameters.
    ///
    /// # Example
    /// ```
    /// # use cloud_snippets_lro::exponential_backoff::{BuildError, ExponentialBackoffBuilder};
    /// use std::time::Duration;
    ///
    /// let policy = ExponentialBackoffBuilder::new()
    ///         .with_initial_delay(Duration::from_millis(100))
    ///         .with_maximum_delay(Duration::from_secs(5))
    ///         .with_scaling(4.0)
    ///         .build()?;
    /// # Ok::<(), BuildError>(())
    /// ```
    pub fn new() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            scaling: 2.0,
        }
    }

    /// Change the initial delay.
    pub fn with_initial_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.initial_delay = v.into();
        self
    }

    /// Change the maximum delay.
    pub fn with_maximum_delay<V: Into<Duration>>(mut self, v: V) -> Self {
        self.maximum_delay = v.into();
        self
    }

    /// Change the scaling factor in this backoff policy.
    pub fn with_scaling<V: Into<f64>>(mut self, v: V) -> Self {
        self.scaling = v.into();
        self
    }

    /// Creates a new exponential backoff policy.
    ///
    /// # Example
    /// ```
    /// # use cloud_snippets_lro::exponential_backoff::{BuildError, ExponentialBackoffBuilder};
    /// # use cloud_snippets_lro::{PollingBackoffPolicy, PollingState};
    /// use std::time::Duration;
    /// let backoff = ExponentialBackoffBuilder::new()
    ///     .with_initial_delay(Duration::from_secs(5))
    ///     .with_maximum_delay(Duration::from_secs(50))
    ///     .with_scaling(2.0)
    ///     .build()?;
    /// let state = PollingState::default().set_attempt_count(2_u32);
    /// assert_eq!(backoff.wait_period(&state), Duration::from_secs(10));
    /// # Ok::<(), BuildError>(())
    /// ```
    pub fn build(self) -> Result<ExponentialBackoff, BuildError> {
        if self.scaling < 1.0 || self.scaling.is_nan() {
            return Err(BuildError::InvalidScalingFactor(self.scaling));
        }
        if self.initial_delay.is_zero() {
            return Err(BuildError::InvalidInitialDelay(self.initial_delay));
        }
        if self.maximum_delay < self.initial_delay {
            return Err(BuildError::EmptyRange {
                maximum: self.maximum_delay,
                initial: self.initial_delay,
            });
        }
        Ok(ExponentialBackoff {
            initial_delay: self.initial_delay,
            maximum_delay: self.maximum_delay,
            scaling: self.scaling,
        })
    }
}

impl Default for ExponentialBackoffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Implements truncated exponential backoff.
///
/// The wait period after the n-th attempt is `initial * scaling^(n-1)`,
/// truncated to `maximum`. It never decreases as the attempt count grows and
/// it is never shorter than the initial delay.
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    maximum_delay: Duration,
    scaling: f64,
}

impl ExponentialBackoff {
    /// A policy that always waits for `interval`.
    ///
    /// A zero interval is rounded up to one millisecond.
    pub fn fixed(interval: Duration) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            initial_delay: interval,
            maximum_delay: interval,
            scaling: 1.0,
        }
    }

    /// The shortest wait period returned by this policy.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    fn delay(&self, attempt_count: u32) -> Duration {
        let exp = std::cmp::min(i32::MAX as u32, attempt_count) as i32;
        let exp = exp.saturating_sub(1);
        let scaling = self.scaling.powi(exp);
        if scaling >= self.maximum_delay.div_duration_f64(self.initial_delay) {
            self.maximum_delay
        } else {
            // scaling >= 1.0 and initial_delay * scaling < maximum_delay
            self.initial_delay.mul_f64(scaling)
        }
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            maximum_delay: Duration::from_secs(60),
            scaling: 2.0,
        }
    }
}

impl crate::polling_backoff_policy::PollingBackoffPolicy for ExponentialBackoff {
    fn wait_period(&self, state: &PollingState) -> Duration {
        self.delay(state.attempt_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling_backoff_policy::PollingBackoffPolicy;
    use test_case::test_case;

    #[test]
    fn build_errors() {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::ZERO)
            .with_maximum_delay(Duration::from_secs(5))
            .build();
        assert!(matches!(b, Err(BuildError::InvalidInitialDelay(_))), "{b:?}");

        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(10))
            .with_maximum_delay(Duration::from_secs(5))
            .build();
        assert!(matches!(b, Err(BuildError::EmptyRange { .. })), "{b:?}");
    }

    #[test_case(-1.0)]
    #[test_case(0.0)]
    #[test_case(0.99)]
    #[test_case(f64::NAN)]
    fn invalid_scaling(scaling: f64) {
        let b = ExponentialBackoffBuilder::new()
            .with_scaling(scaling)
            .build();
        assert!(
            matches!(b, Err(BuildError::InvalidScalingFactor(_))),
            "{b:?}"
        );
    }

    #[test]
    fn build_limits() {
        let r = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_nanos(1))
            .with_maximum_delay(Duration::MAX)
            .build();
        assert!(r.is_ok(), "{r:?}");

        let r = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_maximum_delay(Duration::MAX)
            .with_scaling(1.0)
            .build();
        assert!(r.is_ok(), "{r:?}");
    }

    #[test]
    fn builder_defaults() {
        let r = ExponentialBackoffBuilder::new().build();
        assert!(r.is_ok(), "{r:?}");
        let r = ExponentialBackoffBuilder::default().build();
        assert!(r.is_ok(), "{r:?}");
    }

    #[test]
    fn scaling() {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_maximum_delay(Duration::from_secs(4))
            .with_scaling(2.0)
            .build()
            .expect("should succeed with the hard-coded test values");

        assert_eq!(b.delay(1), Duration::from_secs(1));
        assert_eq!(b.delay(2), Duration::from_secs(2));
        assert_eq!(b.delay(3), Duration::from_secs(4));
        assert_eq!(b.delay(4), Duration::from_secs(4));
        assert_eq!(b.delay(u32::MAX), Duration::from_secs(4));
    }

    #[test]
    fn wait_period_nondecreasing() {
        let b = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_millis(250))
            .with_maximum_delay(Duration::from_secs(30))
            .with_scaling(1.5)
            .build()
            .expect("should succeed with the hard-coded test values");
        let mut previous = Duration::ZERO;
        for count in 1..100_u32 {
            let state = PollingState::default().set_attempt_count(count);
            let got = b.wait_period(&state);
            assert!(got >= previous, "{count} {got:?} {previous:?}");
            assert!(got >= b.initial_delay(), "{count} {got:?}");
            previous = got;
        }
        assert_eq!(previous, Duration::from_secs(30));
    }

    #[test_case(Duration::from_secs(5), Duration::from_secs(5))]
    #[test_case(Duration::ZERO, Duration::from_millis(1))]
    fn fixed(interval: Duration, want: Duration) {
        let b = ExponentialBackoff::fixed(interval);
        for count in [1_u32, 2, 10, 1000] {
            let state = PollingState::default().set_attempt_count(count);
            assert_eq!(b.wait_period(&state), want, "{count}");
        }
    }

    #[test]
    fn default() {
        let b = ExponentialBackoff::default();
        assert_eq!(b.initial_delay(), Duration::from_secs(1));
        assert_eq!(b.delay(100), Duration::from_secs(60));
    }
}
