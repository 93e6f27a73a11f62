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

//! Defines the types for polling error policies.
//!
//! # Example
//! ```
//! # use cloud_snippets_lro::polling_error_policy::*;
//! // Tolerate at most 5 consecutive transport errors, and stop after 50
//! // status fetches: whichever limit is reached first stops the loop.
//! let policy = TransientOnly
//!     .with_error_limit(5)
//!     .with_attempt_limit(50);
//! ```
//!
//! The poller needs to (1) distinguish between transient and permanent errors
//! fetching the operation status, and (2) bound how many transient errors it
//! tolerates before giving up.
//!
//! We provide a trait that applications may implement to customize the
//! behavior of the polling loop, and some common implementations that should
//! meet most needs.

use crate::error::Error;
use crate::loop_state::LoopState;
use crate::polling_state::PollingState;

/// Determines how errors are handled in the polling loop.
///
/// Implementations of this trait determine if status fetch errors may resolve
/// in future attempts, and how many attempts the polling loop may make.
pub trait PollingErrorPolicy: Send + Sync + std::fmt::Debug {
    /// Query the polling policy after an error.
    ///
    /// # Parameters
    /// * `state` - the current state of the polling loop. The poller updates
    ///   the attempt and error counts before calling this function, so both
    ///   are always non-zero.
    /// * `error` - the last error fetching the status.
    fn on_error(&self, state: &PollingState, error: Error) -> LoopState;

    /// Called when the status is successfully fetched, but the operation is
    /// still in progress.
    ///
    /// Returning an error stops the polling loop with that error.
    fn on_in_progress(&self, _state: &PollingState, _handle: &str) -> Option<Error> {
        None
    }
}

/// Extension trait for [PollingErrorPolicy]
pub trait PollingErrorPolicyExt: PollingErrorPolicy + Sized {
    /// Decorate a [PollingErrorPolicy] to limit the number of consecutive
    /// errors.
    ///
    /// The policy passes through the results from the inner policy as long as
    /// `error_count <= maximum_errors`. Once more than `maximum_errors`
    /// consecutive fetches fail, the policy returns
    /// [Exhausted][LoopState::Exhausted] if the inner policy returns
    /// [Continue][LoopState::Continue].
    ///
    /// # Example
    /// ```
    /// # use cloud_snippets_lro::polling_error_policy::*;
    /// # use cloud_snippets_lro::{Error, PollingState};
    /// let policy = TransientOnly.with_error_limit(3);
    /// let state = PollingState::default().set_error_count(3_u32);
    /// assert!(policy.on_error(&state, Error::transport("reset")).is_continue());
    /// let state = PollingState::default().set_error_count(4_u32);
    /// assert!(policy.on_error(&state, Error::transport("reset")).is_exhausted());
    /// ```
    fn with_error_limit(self, maximum_errors: u32) -> LimitedErrorCount<Self> {
        LimitedErrorCount::custom(self, maximum_errors)
    }

    /// Decorate a [PollingErrorPolicy] to limit the number of status fetches.
    ///
    /// Once `attempt_count >= maximum_attempts` the policy stops the loop:
    /// errors the inner policy would continue on become
    /// [Exhausted][LoopState::Exhausted], and in-progress results become a
    /// [Timeout][crate::ErrorKind::Timeout] error.
    ///
    /// # Example
    /// ```
    /// # use cloud_snippets_lro::polling_error_policy::*;
    /// # use cloud_snippets_lro::{Error, PollingState};
    /// let policy = AlwaysContinue.with_attempt_limit(3);
    /// let state = PollingState::default().set_attempt_count(2_u32);
    /// assert!(policy.on_in_progress(&state, "operations/123").is_none());
    /// let state = PollingState::default().set_attempt_count(3_u32);
    /// assert!(policy.on_in_progress(&state, "operations/123").is_some());
    /// ```
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: PollingErrorPolicy> PollingErrorPolicyExt for T {}

/// A polling policy that continues only on transport errors.
///
/// This policy should be decorated to limit the number of errors, the
/// default [PollingOptions][crate::PollingOptions] tolerate 3 consecutive
/// errors.
///
/// # Example
/// ```
/// # use cloud_snippets_lro::polling_error_policy::*;
/// # use cloud_snippets_lro::{Error, PollingState};
/// let state = PollingState::default();
/// assert!(TransientOnly.on_error(&state, Error::transport("reset")).is_continue());
/// assert!(TransientOnly.on_error(&state, Error::not_found("operations/123")).is_permanent());
/// ```
#[derive(Clone, Debug)]
pub struct TransientOnly;

impl PollingErrorPolicy for TransientOnly {
    fn on_error(&self, _state: &PollingState, error: Error) -> LoopState {
        if error.is_transport() {
            LoopState::Continue(error)
        } else {
            LoopState::Permanent(error)
        }
    }
}

/// A polling policy that continues on any error.
///
/// This policy must be decorated to limit the number of polling attempts, or
/// used with a poller that has a maximum wait time.
#[derive(Clone, Debug)]
pub struct AlwaysContinue;

impl PollingErrorPolicy for AlwaysContinue {
    fn on_error(&self, _state: &PollingState, error: Error) -> LoopState {
        LoopState::Continue(error)
    }
}

/// A polling policy decorator that limits the number of consecutive errors.
///
/// # Parameters
/// * `P` - the inner polling policy, defaults to [TransientOnly].
#[derive(Debug)]
pub struct LimitedErrorCount<P = TransientOnly>
where
    P: PollingErrorPolicy,
{
    inner: P,
    maximum_errors: u32,
}

impl LimitedErrorCount {
    /// Creates a new instance, with the default inner policy.
    pub fn new(maximum_errors: u32) -> Self {
        Self {
            inner: TransientOnly,
            maximum_errors,
        }
    }
}

impl<P> LimitedErrorCount<P>
where
    P: PollingErrorPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_errors: u32) -> Self {
        Self {
            inner,
            maximum_errors,
        }
    }
}

impl<P> PollingErrorPolicy for LimitedErrorCount<P>
where
    P: PollingErrorPolicy,
{
    fn on_error(&self, state: &PollingState, error: Error) -> LoopState {
        match self.inner.on_error(state, error) {
            LoopState::Permanent(e) => LoopState::Permanent(e),
            LoopState::Exhausted(e) => LoopState::Exhausted(e),
            LoopState::Continue(e) if state.error_count > self.maximum_errors => {
                LoopState::Exhausted(e)
            }
            LoopState::Continue(e) => LoopState::Continue(e),
        }
    }

    fn on_in_progress(&self, state: &PollingState, handle: &str) -> Option<Error> {
        self.inner.on_in_progress(state, handle)
    }
}

/// A polling policy decorator that limits the number of status fetches.
///
/// # Parameters
/// * `P` - the inner polling policy, defaults to [TransientOnly].
#[derive(Debug)]
pub struct LimitedAttemptCount<P = TransientOnly>
where
    P: PollingErrorPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    /// Creates a new instance, with the default inner policy.
    pub fn new(maximum_attempts: u32) -> Self {
        Self {
            inner: TransientOnly,
            maximum_attempts,
        }
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    /// Creates a new instance with a custom inner policy.
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }

    fn in_progress_impl(&self, count: u32, handle: &str) -> Option<Error> {
        if count < self.maximum_attempts {
            return None;
        }
        Some(Error::timeout(Exhausted::new(
            handle,
            "attempt count",
            count.to_string(),
            self.maximum_attempts.to_string(),
        )))
    }
}

impl<P> PollingErrorPolicy for LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    fn on_error(&self, state: &PollingState, error: Error) -> LoopState {
        match self.inner.on_error(state, error) {
            LoopState::Permanent(e) => LoopState::Permanent(e),
            LoopState::Exhausted(e) => LoopState::Exhausted(e),
            LoopState::Continue(e) if state.attempt_count >= self.maximum_attempts => {
                LoopState::Exhausted(e)
            }
            LoopState::Continue(e) => LoopState::Continue(e),
        }
    }

    fn on_in_progress(&self, state: &PollingState, handle: &str) -> Option<Error> {
        self.inner
            .on_in_progress(state, handle)
            .or_else(|| self.in_progress_impl(state.attempt_count, handle))
    }
}

/// Indicates that a polling loop has been exhausted.
///
/// Used as the [source][std::error::Error::source] of
/// [Timeout][crate::ErrorKind::Timeout] errors.
#[derive(Debug)]
pub struct Exhausted {
    handle: String,
    limit_name: &'static str,
    value: String,
    limit: String,
}

impl Exhausted {
    pub fn new(handle: &str, limit_name: &'static str, value: String, limit: String) -> Self {
        Self {
            handle: handle.to_string(),
            limit_name,
            value,
            limit,
        }
    }

    /// The name of the exhausted limit, for example `"elapsed time"`.
    pub fn limit_name(&self) -> &'static str {
        self.limit_name
    }
}

impl std::fmt::Display for Exhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "polling loop for {} exhausted, {} value ({}) exceeds limit ({})",
            self.handle, self.limit_name, self.value, self.limit
        )
    }
}

impl std::error::Error for Exhausted {}
