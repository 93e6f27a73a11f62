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

//! Samples for Google Cloud services.
//!
//! Each module contains the samples for one service. The samples receive an
//! initialized client, issue one or a few RPCs, and print the results.
//! Samples that start asynchronous work (long-running operations, Batch jobs)
//! wait for it with the generic poller in [lro].

pub mod aiplatform;
pub mod apikeys;
pub mod asset;
pub mod batch;
pub mod config;
mod error;
pub mod polling;
pub mod securitycenter;
pub mod talent;

pub use config::Config;
pub use error::{Error, Result};
