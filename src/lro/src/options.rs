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

//! Configuration for a single polling loop.

use crate::exponential_backoff::ExponentialBackoff;
use crate::polling_backoff_policy::PollingBackoffPolicy;
use crate::polling_error_policy::{PollingErrorPolicy, PollingErrorPolicyExt, TransientOnly};
use std::sync::Arc;
use std::time::Duration;

/// The default maximum time spent waiting for an operation.
pub const DEFAULT_MAXIMUM_WAIT: Duration = Duration::from_secs(10 * 60);

/// The default number of consecutive transport errors tolerated by the poller.
pub const DEFAULT_ERROR_LIMIT: u32 = 3;

/// The policies and limits used by a poller.
///
/// # Example
/// ```
/// # use cloud_snippets_lro::{ExponentialBackoff, PollingOptions};
/// use std::time::Duration;
/// let options = PollingOptions::default()
///     .with_maximum_wait(Duration::from_secs(180))
///     .with_backoff_policy(ExponentialBackoff::fixed(Duration::from_secs(5)));
/// assert_eq!(options.maximum_wait(), Duration::from_secs(180));
/// ```
#[derive(Clone, Debug)]
pub struct PollingOptions {
    maximum_wait: Duration,
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
}

impl PollingOptions {
    /// Change the maximum time the poller waits for a terminal state.
    pub fn with_maximum_wait<V: Into<Duration>>(mut self, v: V) -> Self {
        self.maximum_wait = v.into();
        self
    }

    /// Change the polling error policy.
    pub fn with_error_policy<V: PollingErrorPolicy + 'static>(mut self, v: V) -> Self {
        self.error_policy = Arc::new(v);
        self
    }

    /// Change the polling backoff policy.
    pub fn with_backoff_policy<V: PollingBackoffPolicy + 'static>(mut self, v: V) -> Self {
        self.backoff_policy = Arc::new(v);
        self
    }

    pub fn maximum_wait(&self) -> Duration {
        self.maximum_wait
    }

    pub fn error_policy(&self) -> Arc<dyn PollingErrorPolicy> {
        self.error_policy.clone()
    }

    pub fn backoff_policy(&self) -> Arc<dyn PollingBackoffPolicy> {
        self.backoff_policy.clone()
    }
}

impl Default for PollingOptions {
    fn default() -> Self {
        Self {
            maximum_wait: DEFAULT_MAXIMUM_WAIT,
            error_policy: Arc::new(TransientOnly.with_error_limit(DEFAULT_ERROR_LIMIT)),
            backoff_policy: Arc::new(ExponentialBackoff::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PollingState;
    use crate::error::Error;

    #[test]
    fn defaults() {
        let options = PollingOptions::default();
        assert_eq!(options.maximum_wait(), DEFAULT_MAXIMUM_WAIT);

        let policy = options.error_policy();
        let state = PollingState::default().set_error_count(DEFAULT_ERROR_LIMIT);
        assert!(policy.on_error(&state, Error::transport("reset")).is_continue());
        let state = PollingState::default().set_error_count(DEFAULT_ERROR_LIMIT + 1);
        assert!(policy.on_error(&state, Error::transport("reset")).is_exhausted());
        let state = PollingState::default().set_error_count(1_u32);
        assert!(policy.on_error(&state, Error::not_found("op")).is_permanent());

        let state = PollingState::default().set_attempt_count(1_u32);
        assert_eq!(
            options.backoff_policy().wait_period(&state),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn setters() {
        let options = PollingOptions::default()
            .with_maximum_wait(Duration::from_secs(3))
            .with_error_policy(crate::polling_error_policy::AlwaysContinue)
            .with_backoff_policy(ExponentialBackoff::fixed(Duration::from_millis(500)));
        assert_eq!(options.maximum_wait(), Duration::from_secs(3));
        let state = PollingState::default().set_attempt_count(7_u32);
        assert!(
            options
                .error_policy()
                .on_error(&state, Error::other("x"))
                .is_continue()
        );
        assert_eq!(
            options.backoff_policy().wait_period(&state),
            Duration::from_millis(500)
        );
    }
}
