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

//! Poll server-side operations until they reach a terminal state.
//!
//! Many Google Cloud APIs start work that completes asynchronously: a
//! long-running operation, a batch job, a resource that is provisioned in the
//! background. This crate provides a generic poller: given an operation
//! handle and a function to fetch its current status, it waits until the
//! operation succeeds, fails, or a deadline expires.
//!
//! The poller does not depend on any specific service. Applications provide
//! a closure that maps the service response to an [OperationStatus].
//!
//! # Example
//! ```
//! # use cloud_snippets_lro::*;
//! # tokio_test::block_on(async {
//! let fetch = |name: String| async move {
//!     // Typically this calls a service, e.g. `client.get_operation()`.
//!     let _ = name;
//!     Ok(OperationStatus::Succeeded(42))
//! };
//! let value = poll_until_terminal(PollingOptions::default(), "operations/123".to_string(), fetch)
//!     .await?;
//! assert_eq!(value, 42);
//! # Ok::<(), Error>(()) });
//! ```

pub mod error;
pub mod exponential_backoff;
pub mod loop_state;
mod options;
mod poller;
pub mod polling_backoff_policy;
pub mod polling_error_policy;
mod polling_state;
mod status;

pub use error::{Error, ErrorKind};
pub use exponential_backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
pub use options::{DEFAULT_ERROR_LIMIT, DEFAULT_MAXIMUM_WAIT, PollingOptions};
pub use polling_backoff_policy::PollingBackoffPolicy;
pub use polling_error_policy::PollingErrorPolicy;
pub use polling_state::PollingState;
pub use status::{OperationState, OperationStatus};

/// The result type for the poller.
pub type Result<T> = std::result::Result<T, Error>;

/// The result of polling an operation once.
///
/// # Parameters
/// * `R` - the result type. This is the type returned when the operation
///   completes successfully.
#[derive(Debug)]
pub enum PollingResult<R> {
    /// The operation is still in progress.
    InProgress(OperationState),
    /// The operation completed, or the poller gave up. This includes the
    /// result.
    Completed(Result<R>),
    /// An error trying to fetch the operation status.
    ///
    /// The polling error policy decided this error may go away in the next
    /// attempt. Errors that never recover are reported via
    /// [Completed][PollingResult::Completed].
    PollingError(Error),
}

/// The trait implemented by pollers.
///
/// # Parameters
/// * `R` - the result type, that is, the type included when the operation
///   completes successfully.
pub trait Poller<R>: Send + sealed::Poller {
    /// Fetch the current status of the operation.
    ///
    /// Returns `None` once the poller has returned a
    /// [Completed][PollingResult::Completed] result.
    fn poll(&mut self) -> impl Future<Output = Option<PollingResult<R>>> + Send;

    /// Poll the operation until it completes.
    ///
    /// The poller sleeps between status fetches, as determined by the
    /// [PollingBackoffPolicy]. It never sleeps past the deadline, and never
    /// fetches the status after the deadline. A fetch still pending at the
    /// deadline is dropped and the poller returns a timeout.
    fn until_done(self) -> impl Future<Output = Result<R>> + Send;

    /// Convert a poller to a [futures::Stream].
    ///
    /// The stream sleeps between items, in the same way as
    /// [until_done][Poller::until_done].
    #[cfg(feature = "unstable-stream")]
    fn into_stream(self) -> impl futures::Stream<Item = PollingResult<R>> + Unpin;
}

/// Creates a new `impl Poller<R>` from a handle and a status fetch closure.
///
/// # Example
/// ```
/// # use cloud_snippets_lro::*;
/// # tokio_test::block_on(async {
/// let mut count = 0;
/// let fetch = move |_: &'static str| {
///     count += 1;
///     let status = if count < 3 { OperationStatus::Running } else { OperationStatus::Succeeded(count) };
///     async move { Ok(status) }
/// };
/// let options = PollingOptions::default()
///     .with_backoff_policy(ExponentialBackoff::fixed(std::time::Duration::from_millis(1)));
/// let mut poller = new_poller(options, "operations/123", fetch);
/// while let Some(p) = poller.poll().await {
///     match p {
///         PollingResult::InProgress(s) => println!("still {s}"),
///         PollingResult::PollingError(e) => println!("recoverable error: {e}"),
///         PollingResult::Completed(r) => println!("done: {:?}", r?),
///     }
/// }
/// # Ok::<(), Error>(()) });
/// ```
pub fn new_poller<R, H, F, Fut>(options: PollingOptions, handle: H, fetch: F) -> impl Poller<R>
where
    R: Send,
    H: Clone + std::fmt::Debug + Send + Sync,
    F: FnMut(H) -> Fut + Send,
    Fut: Future<Output = Result<OperationStatus<R>>> + Send,
{
    poller::PollerImpl::new(options, handle, fetch)
}

/// Polls the operation identified by `handle` until it reaches a terminal
/// state.
///
/// Equivalent to `new_poller(options, handle, fetch).until_done().await`.
pub async fn poll_until_terminal<R, H, F, Fut>(
    options: PollingOptions,
    handle: H,
    fetch: F,
) -> Result<R>
where
    R: Send,
    H: Clone + std::fmt::Debug + Send + Sync,
    F: FnMut(H) -> Fut + Send,
    Fut: Future<Output = Result<OperationStatus<R>>> + Send,
{
    new_poller(options, handle, fetch).until_done().await
}

pub(crate) mod sealed {
    pub trait Poller {}
}
