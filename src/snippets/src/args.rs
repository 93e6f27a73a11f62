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

use clap::{Parser, Subcommand, ValueEnum};
use cloud_snippets::Config;
use cloud_snippets::{aiplatform, securitycenter};

/// Run the Google Cloud samples.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = super::DESCRIPTION)]
pub struct Args {
    #[command(flatten)]
    pub config: Config,

    /// Log debug messages to stderr. Otherwise use `RUST_LOG`.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub service: Service,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Service {
    /// Vertex AI prediction samples.
    #[command(subcommand)]
    Aiplatform(AiplatformAction),
    /// API Keys samples.
    #[command(subcommand)]
    Apikeys(ApikeysAction),
    /// Cloud Asset Inventory feed samples.
    #[command(subcommand)]
    Asset(AssetAction),
    /// Batch job samples.
    #[command(subcommand)]
    Batch(BatchAction),
    /// Security Health Analytics custom module samples.
    #[command(subcommand)]
    Scc(SccAction),
    /// Cloud Talent Solution samples.
    #[command(subcommand)]
    Talent(TalentAction),
}

#[derive(Clone, Debug, Subcommand)]
pub enum AiplatformAction {
    /// Generate code with a code chat model.
    Predict {
        #[arg(long, default_value = aiplatform::DEFAULT_PUBLISHER)]
        publisher: String,
        #[arg(long, default_value = aiplatform::DEFAULT_MODEL)]
        model: String,
        /// The conversation, as a JSON object.
        #[arg(long, default_value = aiplatform::DEFAULT_INSTANCE)]
        instance: String,
        /// The model parameters, as a JSON object.
        #[arg(long, default_value = aiplatform::DEFAULT_PARAMETERS)]
        parameters: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum ApikeysAction {
    /// Restrict an API key to a set of server IP addresses.
    Restrict {
        #[arg(long)]
        key_id: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum FeedContent {
    Resource,
    Relationship,
}

impl From<FeedContent> for cloud_snippets::asset::ContentType {
    fn from(value: FeedContent) -> Self {
        match value {
            FeedContent::Resource => Self::Resource,
            FeedContent::Relationship => Self::Relationship,
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum AssetAction {
    Create {
        #[arg(long)]
        feed_id: String,
        /// The full topic name, `projects/{project}/topics/{topic}`.
        #[arg(long)]
        topic: String,
        #[arg(long = "asset-name", required = true)]
        asset_names: Vec<String>,
        #[arg(long, value_enum, default_value_t = FeedContent::Resource)]
        content_type: FeedContent,
    },
    Get {
        /// The full feed name, `projects/{project_number}/feeds/{feed_id}`.
        #[arg(long)]
        feed_name: String,
    },
    List,
    Update {
        #[arg(long)]
        feed_name: String,
        #[arg(long)]
        topic: String,
    },
    Delete {
        #[arg(long)]
        feed_name: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum BatchAction {
    /// Create a job and optionally wait for it to complete.
    Create {
        #[arg(long)]
        job_id: String,
        /// Wait until the job succeeds or fails.
        #[arg(long, default_value_t = false)]
        wait: bool,
        #[command(subcommand)]
        shape: JobShape,
    },
    Get {
        #[arg(long)]
        job_id: String,
    },
    Delete {
        #[arg(long)]
        job_id: String,
    },
    /// Wait until a job succeeds or fails.
    Wait {
        #[arg(long)]
        job_id: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum JobShape {
    Script,
    ServiceAccount {
        #[arg(long, default_value = "")]
        email: String,
    },
    Secret {
        #[arg(long)]
        variable_name: String,
        #[arg(long)]
        secret_name: String,
        #[arg(long, default_value = "latest")]
        version: String,
    },
    Gpu {
        #[arg(long, default_value = "nvidia-tesla-t4")]
        gpu_type: String,
        #[arg(long, default_value_t = 1)]
        gpu_count: i64,
        #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
        install_gpu_drivers: bool,
    },
    LocalSsd {
        #[arg(long)]
        disk_name: String,
        #[arg(long, default_value_t = 375)]
        disk_size_gb: i64,
        #[arg(long, default_value = "c3d-standard-8-lssd")]
        machine_type: String,
    },
    PersistentDisk {
        #[arg(long)]
        new_disk_name: String,
        #[arg(long, default_value_t = 10)]
        disk_size_gb: i64,
        #[arg(long)]
        existing_disk_name: String,
        #[arg(long, default_value = "pd-balanced")]
        disk_type: String,
    },
    Notification {
        #[arg(long)]
        topic_id: String,
    },
    CustomEvents,
}

#[derive(Clone, Debug, Subcommand)]
pub enum SccAction {
    Create {
        #[arg(long, default_value = securitycenter::DISPLAY_NAME_PREFIX)]
        display_name: String,
    },
    Get {
        #[arg(long)]
        module_id: String,
    },
    List,
    /// Disable a custom module.
    Update {
        #[arg(long)]
        module_id: String,
    },
    Delete {
        #[arg(long)]
        module_id: String,
    },
    GetEffective {
        #[arg(long)]
        module_id: String,
    },
    ListEffective,
    ListDescendant,
    Simulate,
    /// Delete the custom modules whose display name starts with a prefix.
    Cleanup {
        #[arg(long, default_value = securitycenter::DISPLAY_NAME_PREFIX)]
        prefix: String,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum TalentAction {
    ListCompanies {
        #[arg(long)]
        tenant_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_batch() -> anyhow::Result<()> {
        let args = Args::try_parse_from([
            "cloud-snippets",
            "--project-id=my-project",
            "batch",
            "create",
            "--job-id=my-job",
            "--wait",
            "gpu",
            "--gpu-count=2",
        ])?;
        assert_eq!(args.config.project_id, "my-project");
        let Service::Batch(BatchAction::Create { job_id, wait, shape }) = args.service else {
            panic!("expected a batch create command");
        };
        assert_eq!(job_id, "my-job");
        assert!(wait);
        assert!(
            matches!(shape, JobShape::Gpu { gpu_count: 2, .. }),
            "{shape:?}"
        );
        Ok(())
    }

    #[test]
    fn parse_durations() -> anyhow::Result<()> {
        let args = Args::try_parse_from([
            "cloud-snippets",
            "--project-id=my-project",
            "--max-wait=3m",
            "--poll-interval=500ms",
            "talent",
            "list-companies",
            "--tenant-id=t",
        ])?;
        assert_eq!(args.config.max_wait, std::time::Duration::from_secs(180));
        assert_eq!(
            args.config.poll_interval,
            std::time::Duration::from_millis(500)
        );
        Ok(())
    }
}
