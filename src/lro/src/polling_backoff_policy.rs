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

//! Defines the trait for polling backoff policies.
//!
//! The poller sleeps between status fetches to avoid overloading the service.
//! Polling backoff policies should not use jitter: the wait period only
//! depends on the polling state, which makes the loop predictable and easy to
//! test.
//!
//! The most common implementation is truncated [exponential backoff]
//! **without** jitter. The backoff period grows exponentially until some
//! limit is reached. A scaling factor of 1.0 produces a fixed interval.
//!
//! # Example
//! ```
//! # use cloud_snippets_lro::exponential_backoff::{BuildError, ExponentialBackoffBuilder};
//! use std::time::Duration;
//!
//! let policy = ExponentialBackoffBuilder::new()
//!     .with_initial_delay(Duration::from_millis(100))
//!     .with_maximum_delay(Duration::from_secs(5))
//!     .with_scaling(4.0)
//!     .build()?;
//! // `policy` implements the `PollingBackoffPolicy` trait.
//! # Ok::<(), BuildError>(())
//! ```
//!
//! [exponential backoff]: https://en.wikipedia.org/wiki/Exponential_backoff

use crate::polling_state::PollingState;

/// Defines the trait implemented by all polling backoff strategies.
pub trait PollingBackoffPolicy: Send + Sync + std::fmt::Debug {
    /// Returns the time to wait before the next status fetch.
    ///
    /// # Parameters
    /// * `state` - the polling loop state. This method is always called after
    ///   the first attempt, so `state.attempt_count` is at least 1.
    fn wait_period(&self, state: &PollingState) -> std::time::Duration;
}
