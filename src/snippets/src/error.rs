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

use google_cloud_gax as gax;

/// The error type for all the samples in this crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A request to a Google Cloud service failed.
    #[error(transparent)]
    Service(#[from] gax::error::Error),

    /// A client could not be created, typically because the default
    /// credentials are missing.
    #[error(transparent)]
    Builder(#[from] gax::client_builder::Error),

    /// Waiting for an operation or resource did not produce a result.
    #[error(transparent)]
    Polling(#[from] lro::Error),

    /// A JSON input could not be parsed.
    #[error("cannot parse JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// The sample is missing some required configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns the polling error, if this is one.
    pub fn as_polling(&self) -> Option<&lro::Error> {
        match self {
            Self::Polling(e) => Some(e),
            _ => None,
        }
    }
}

/// The result type for all the samples in this crate.
pub type Result<T> = std::result::Result<T, Error>;
