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

//! The closure based implementation of [Poller].

use crate::loop_state::LoopState;
use crate::polling_error_policy::Exhausted;
use crate::{
    Error, OperationStatus, Poller, PollingBackoffPolicy, PollingErrorPolicy, PollingOptions,
    PollingResult, PollingState, Result,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Polls an operation identified by `handle` using the `fetch` closure.
///
/// # Parameters
/// * `H` - the operation handle, typically the operation or resource name.
/// * `F` - the status fetch closure. It receives a copy of the handle and
///   returns the current status. Any request options, stubs, or clients must
///   be captured by the closure.
pub(crate) struct PollerImpl<H, F> {
    handle: H,
    name: String,
    fetch: F,
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    maximum_wait: Duration,
    deadline: Instant,
    state: PollingState,
    done: bool,
}

impl<H, F> PollerImpl<H, F>
where
    H: std::fmt::Debug,
{
    pub(crate) fn new(options: PollingOptions, handle: H, fetch: F) -> Self {
        let state = PollingState::default();
        let maximum_wait = options.maximum_wait();
        let deadline = state
            .start
            .checked_add(maximum_wait)
            .unwrap_or_else(far_future);
        Self {
            name: format!("{handle:?}"),
            handle,
            fetch,
            error_policy: options.error_policy(),
            backoff_policy: options.backoff_policy(),
            maximum_wait,
            deadline,
            state,
            done: false,
        }
    }
}

impl<H, F> PollerImpl<H, F> {
    fn timeout(&self) -> Error {
        Error::timeout(Exhausted::new(
            &self.name,
            "elapsed time",
            format!("{:?}", self.state.elapsed()),
            format!("{:?}", self.maximum_wait),
        ))
    }

    // The time to sleep before the next fetch, truncated to the deadline.
    fn next_wait(&self) -> Duration {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        self.backoff_policy.wait_period(&self.state).min(remaining)
    }

    fn handle_status<R>(&mut self, status: OperationStatus<R>) -> PollingResult<R> {
        self.state.error_count = 0;
        let current = status.state();
        tracing::debug!(
            handle = %self.name,
            attempt = self.state.attempt_count,
            state = %current,
            "polled operation status"
        );
        match status {
            OperationStatus::Succeeded(r) => PollingResult::Completed(Ok(r)),
            OperationStatus::Failed(e) => {
                PollingResult::Completed(Err(Error::operation_failed(e)))
            }
            OperationStatus::Pending | OperationStatus::Running => {
                match self.error_policy.on_in_progress(&self.state, &self.name) {
                    Some(e) => PollingResult::Completed(Err(e)),
                    None => PollingResult::InProgress(current),
                }
            }
        }
    }

    fn handle_error<R>(&mut self, error: Error) -> PollingResult<R> {
        self.state.error_count += 1;
        match self.error_policy.on_error(&self.state, error) {
            LoopState::Continue(e) => {
                tracing::warn!(
                    handle = %self.name,
                    attempt = self.state.attempt_count,
                    errors = self.state.error_count,
                    "recoverable error polling operation: {e}"
                );
                PollingResult::PollingError(e)
            }
            LoopState::Exhausted(e) | LoopState::Permanent(e) => PollingResult::Completed(Err(e)),
        }
    }
}

impl<H, F> crate::sealed::Poller for PollerImpl<H, F> {}

impl<R, H, F, Fut> Poller<R> for PollerImpl<H, F>
where
    R: Send,
    H: Clone + std::fmt::Debug + Send + Sync,
    F: FnMut(H) -> Fut + Send,
    Fut: Future<Output = Result<OperationStatus<R>>> + Send,
{
    async fn poll(&mut self) -> Option<PollingResult<R>> {
        if self.done {
            return None;
        }
        // The first fetch always happens, later fetches only before the
        // deadline.
        if self.state.attempt_count > 0 && Instant::now() >= self.deadline {
            self.done = true;
            tracing::debug!(handle = %self.name, "deadline reached");
            return Some(PollingResult::Completed(Err(self.timeout())));
        }
        self.state.attempt_count += 1;
        // The deadline also bounds each fetch. A fetch that is immediately
        // ready completes even with no time left.
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        let pending = (self.fetch)(self.handle.clone());
        let Ok(result) = tokio::time::timeout(remaining, pending).await else {
            self.done = true;
            tracing::debug!(handle = %self.name, "deadline reached while fetching status");
            return Some(PollingResult::Completed(Err(self.timeout())));
        };
        let poll = match result {
            Ok(status) => self.handle_status(status),
            Err(e) => self.handle_error(e),
        };
        if matches!(poll, PollingResult::Completed(_)) {
            self.done = true;
        }
        Some(poll)
    }

    async fn until_done(mut self) -> Result<R> {
        while let Some(p) = self.poll().await {
            match p {
                PollingResult::Completed(r) => return r,
                PollingResult::InProgress(_) | PollingResult::PollingError(_) => (),
            }
            tokio::time::sleep(self.next_wait()).await;
        }
        Err(Error::other(format!(
            "the poller for {} already returned its result",
            self.name
        )))
    }

    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R>> + Unpin {
        use futures::stream::unfold;
        Box::pin(unfold(
            (self, false),
            move |(mut poller, backoff)| async move {
                if backoff {
                    tokio::time::sleep(poller.next_wait()).await;
                }
                let pr = poller.poll().await?;
                Some((pr, (poller, true)))
            },
        ))
    }
}

fn far_future() -> Instant {
    // About 30 years, the same bound tokio uses for sleeps without a deadline.
    Instant::now() + Duration::from_secs(86400 * 365 * 30)
}
