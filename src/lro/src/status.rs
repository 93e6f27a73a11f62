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

//! Types describing the status of a server-side operation.

use crate::error::BoxError;

/// The lifecycle state of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationState {
    /// The service accepted the operation but has not started it.
    Pending,
    /// The operation is executing.
    Running,
    /// The operation completed successfully. Terminal.
    Succeeded,
    /// The operation completed with an error. Terminal.
    Failed,
}

impl OperationState {
    /// Returns true for `Succeeded` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for OperationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// The value returned by a single status fetch.
///
/// # Parameters
/// * `R` - the result type, included when the operation succeeds.
#[derive(Debug)]
pub enum OperationStatus<R> {
    Pending,
    Running,
    /// The operation succeeded, with this result.
    Succeeded(R),
    /// The operation failed, this is the error reported by the service.
    Failed(BoxError),
}

impl<R> OperationStatus<R> {
    /// Creates a `Failed` status from any error type.
    pub fn failed<E: Into<BoxError>>(error: E) -> Self {
        Self::Failed(error.into())
    }

    /// The state represented by this status.
    pub fn state(&self) -> OperationState {
        match self {
            Self::Pending => OperationState::Pending,
            Self::Running => OperationState::Running,
            Self::Succeeded(_) => OperationState::Succeeded,
            Self::Failed(_) => OperationState::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }
}
