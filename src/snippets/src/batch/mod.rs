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

//! Samples for the Batch service.
//!
//! The functions in [jobs] build job descriptions of different shapes. The
//! functions in [manage] create, inspect, and delete jobs, and wait for jobs
//! to complete.

pub mod jobs;
pub mod manage;

pub use jobs::*;
pub use manage::*;
