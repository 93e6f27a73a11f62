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

//! Defines types to query polling policies.

use tokio::time::Instant;

/// The input into the polling policies.
///
/// The poller updates an instance of this type after each status fetch, and
/// provides it to the error and backoff policies.
///
/// The start time uses [tokio::time::Instant], so tests can run with paused
/// time.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct PollingState {
    /// The start time for this polling loop.
    pub start: Instant,

    /// The number of status fetches, including failed fetches.
    pub attempt_count: u32,

    /// The number of consecutive failed fetches.
    ///
    /// Reset to zero after each successful fetch.
    pub error_count: u32,
}

impl PollingState {
    /// Update the start time, useful in mocks.
    pub fn set_start<T: Into<Instant>>(mut self, v: T) -> Self {
        self.start = v.into();
        self
    }

    /// Update the attempt count, useful in mocks.
    pub fn set_attempt_count<T: Into<u32>>(mut self, v: T) -> Self {
        self.attempt_count = v.into();
        self
    }

    /// Update the error count, useful in mocks.
    pub fn set_error_count<T: Into<u32>>(mut self, v: T) -> Self {
        self.error_count = v.into();
        self
    }

    /// The time spent in the polling loop so far.
    pub fn elapsed(&self) -> std::time::Duration {
        Instant::now().saturating_duration_since(self.start)
    }
}

impl std::default::Default for PollingState {
    fn default() -> Self {
        Self {
            start: Instant::now(),
            attempt_count: 0,
            error_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn setters() {
        let start = Instant::now() - Duration::from_secs(5);
        let state = PollingState::default()
            .set_start(start)
            .set_attempt_count(3_u32)
            .set_error_count(2_u32);
        assert_eq!(state.start, start);
        assert_eq!(state.attempt_count, 3);
        assert_eq!(state.error_count, 2);
        assert!(state.elapsed() >= Duration::from_secs(5), "{state:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_follows_tokio_time() {
        let state = PollingState::default();
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(state.elapsed(), Duration::from_secs(30));
    }
}
