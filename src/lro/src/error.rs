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

//! The error type returned by the operation poller.

use std::error::Error as StdError;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// The error returned when polling an operation does not produce a result.
///
/// The poller reports errors from two sources: the operation itself may
/// complete with a failure, or the polling loop may be unable to obtain a
/// terminal status. This type offers a predicate for each [ErrorKind], and
/// applications can query the error [source][std::error::Error::source] for
/// deeper information.
///
/// # Example
/// ```
/// use cloud_snippets_lro::Error;
/// match example_function() {
///     Err(e) if e.is_operation_failed() => println!("the operation failed: {e}"),
///     Err(e) if e.is_timeout() => println!("not enough time: {e}"),
///     Err(e) => println!("some other error: {e}"),
///     Ok(v) => println!("success: {v}"),
/// }
///
/// fn example_function() -> Result<String, Error> {
///     # Err(Error::not_found("operations/123"))
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

/// The category of an [Error].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The service reported that the operation completed with an error.
    OperationFailed,
    /// The deadline elapsed while the operation was still pending or running.
    Timeout,
    /// The service does not know the operation handle.
    NotFound,
    /// A transient problem prevented the poller from fetching the status.
    Transport,
    /// Any other problem fetching or decoding the status. Never retried.
    Other,
}

impl Error {
    /// Creates an error representing a failed operation.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use cloud_snippets_lro::Error;
    /// let error = Error::operation_failed("disk quota exceeded");
    /// assert!(error.is_operation_failed());
    /// assert!(error.source().is_some());
    /// ```
    pub fn operation_failed<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::OperationFailed, source)
    }

    /// The service reported that the operation failed.
    ///
    /// The error source contains the upstream error, as reported by the
    /// service.
    pub fn is_operation_failed(&self) -> bool {
        matches!(self.kind, ErrorKind::OperationFailed)
    }

    /// Creates an error representing an expired deadline.
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Timeout, source)
    }

    /// The operation did not reach a terminal state before the deadline.
    ///
    /// This is always a client-side error. The operation may still complete
    /// in the service.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// Creates an error representing an unknown operation handle.
    pub fn not_found<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::NotFound, source)
    }

    /// The status-fetch capability does not know the operation.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound)
    }

    /// Creates an error representing a transient transport problem.
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Transport, source)
    }

    /// The status could not be fetched due to a (likely) transient problem.
    ///
    /// The default polling policies retry these errors a few times before
    /// returning them to the application.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport)
    }

    /// Creates an error that fits no other category.
    pub fn other<T: Into<BoxError>>(source: T) -> Self {
        Self::new(ErrorKind::Other, source)
    }

    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn new<T: Into<BoxError>>(kind: ErrorKind, source: T) -> Self {
        Self {
            kind,
            source: Some(source.into()),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.kind {
            ErrorKind::OperationFailed => "the operation completed with an error",
            ErrorKind::Timeout => "the operation did not complete before the deadline",
            ErrorKind::NotFound => "the operation was not found",
            ErrorKind::Transport => "cannot fetch the operation status",
            ErrorKind::Other => "error polling the operation",
        };
        match &self.source {
            Some(e) => write!(f, "{prefix}: {e}"),
            None => write!(f, "{prefix}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}
