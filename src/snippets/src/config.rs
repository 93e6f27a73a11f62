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

//! Project, location, and polling configuration shared by the samples.

use crate::{Error, Result};
use clap::Args;
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-central1";
pub const DEFAULT_ZONE: &str = "us-central1-a";

/// Configuration shared by all the samples.
///
/// The CLI reads these values from flags or environment variables. Tests use
/// [Config::from_env].
#[derive(Args, Clone, Debug, PartialEq)]
pub struct Config {
    /// The Google Cloud project used by the samples.
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project_id: String,

    /// The region for regional resources, such as Batch jobs.
    #[arg(long, env = "GOOGLE_CLOUD_REGION", default_value = DEFAULT_REGION)]
    pub region: String,

    /// The zone for zonal resources, such as persistent disks.
    #[arg(long, env = "GOOGLE_CLOUD_ZONE", default_value = DEFAULT_ZONE)]
    pub zone: String,

    /// The project for Security Command Center samples, defaults to the
    /// project id.
    #[arg(long, env = "SCC_PROJECT_ID")]
    pub scc_project_id: Option<String>,

    /// The maximum time to wait for operations and jobs.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "10m")]
    pub max_wait: Duration,

    /// The initial polling interval.
    #[arg(long, value_parser = humantime::parse_duration, default_value = "1s")]
    pub poll_interval: Duration,
}

impl Config {
    /// Loads the configuration from the environment.
    ///
    /// Only `GOOGLE_CLOUD_PROJECT` is required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let project_id = non_empty("GOOGLE_CLOUD_PROJECT").ok_or_else(|| {
            Error::Config("the GOOGLE_CLOUD_PROJECT environment variable is not set".into())
        })?;
        Ok(Self {
            project_id,
            region: non_empty("GOOGLE_CLOUD_REGION").unwrap_or_else(|| DEFAULT_REGION.into()),
            zone: non_empty("GOOGLE_CLOUD_ZONE").unwrap_or_else(|| DEFAULT_ZONE.into()),
            scc_project_id: non_empty("SCC_PROJECT_ID"),
            max_wait: lro::DEFAULT_MAXIMUM_WAIT,
            poll_interval: Duration::from_secs(1),
        })
    }

    /// The project for Security Command Center samples.
    pub fn scc_project_id(&self) -> &str {
        self.scc_project_id.as_deref().unwrap_or(&self.project_id)
    }

    /// The polling options derived from this configuration.
    ///
    /// The backoff starts at `poll_interval` and grows up to one minute.
    pub fn polling_options(&self) -> Result<lro::PollingOptions> {
        let initial = self.poll_interval;
        let backoff = lro::ExponentialBackoffBuilder::new()
            .with_initial_delay(initial)
            .with_maximum_delay(initial.max(Duration::from_secs(60)))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(lro::PollingOptions::default()
            .with_maximum_wait(self.max_wait)
            .with_backoff_policy(backoff))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() -> anyhow::Result<()> {
        let config = Config::from_lookup(lookup(&[("GOOGLE_CLOUD_PROJECT", "my-project")]))?;
        assert_eq!(config.project_id, "my-project");
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.zone, DEFAULT_ZONE);
        assert_eq!(config.scc_project_id(), "my-project");
        assert_eq!(config.max_wait, lro::DEFAULT_MAXIMUM_WAIT);
        Ok(())
    }

    #[test]
    fn overrides() -> anyhow::Result<()> {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_CLOUD_PROJECT", "my-project"),
            ("GOOGLE_CLOUD_REGION", "europe-west1"),
            ("GOOGLE_CLOUD_ZONE", "europe-west1-b"),
            ("SCC_PROJECT_ID", "scc-project"),
        ]))?;
        assert_eq!(config.region, "europe-west1");
        assert_eq!(config.zone, "europe-west1-b");
        assert_eq!(config.scc_project_id(), "scc-project");
        Ok(())
    }

    #[test]
    fn missing_project() {
        let got = Config::from_lookup(lookup(&[("GOOGLE_CLOUD_PROJECT", "")]));
        assert!(matches!(got, Err(Error::Config(_))), "{got:?}");
        let got = Config::from_lookup(lookup(&[]));
        assert!(matches!(got, Err(Error::Config(_))), "{got:?}");
    }

    #[test]
    fn polling_options() -> anyhow::Result<()> {
        let mut config = Config::from_lookup(lookup(&[("GOOGLE_CLOUD_PROJECT", "p")]))?;
        config.max_wait = Duration::from_secs(180);
        config.poll_interval = Duration::from_secs(5);
        let options = config.polling_options()?;
        assert_eq!(options.maximum_wait(), Duration::from_secs(180));
        let state = lro::PollingState::default().set_attempt_count(1_u32);
        assert_eq!(
            options.backoff_policy().wait_period(&state),
            Duration::from_secs(5)
        );
        Ok(())
    }

    #[test]
    fn zero_poll_interval() -> anyhow::Result<()> {
        let mut config = Config::from_lookup(lookup(&[("GOOGLE_CLOUD_PROJECT", "p")]))?;
        config.poll_interval = Duration::ZERO;
        let got = config.polling_options();
        assert!(matches!(got, Err(Error::Config(_))), "{got:?}");
        Ok(())
    }
}
