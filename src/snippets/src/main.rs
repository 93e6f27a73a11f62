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

//! Run the Google Cloud samples from the command line.

mod args;

use args::{
    AiplatformAction, ApikeysAction, Args, AssetAction, BatchAction, JobShape, SccAction, Service,
    TalentAction,
};
use clap::Parser;
use cloud_snippets::{Config, aiplatform, apikeys, asset, batch, securitycenter, talent};
use google_cloud_apikeys_v2::client::ApiKeys;
use google_cloud_asset_v1::client::AssetService;
use google_cloud_batch_v1::client::BatchService;
use google_cloud_securitycentermanagement_v1::client::SecurityCenterManagement;
use google_cloud_talent_v4::client::CompanyService;

const DESCRIPTION: &str = concat!(
    "Samples for Google Cloud services.",
    " Each command runs one sample, using the project in GOOGLE_CLOUD_PROJECT",
    " and the default application credentials."
);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    enable_tracing(&args)?;
    tracing::debug!("Configuration: {:?}", args.config);

    match args.service {
        Service::Aiplatform(action) => run_aiplatform(&args.config, action).await?,
        Service::Apikeys(action) => run_apikeys(&args.config, action).await?,
        Service::Asset(action) => run_asset(&args.config, action).await?,
        Service::Batch(action) => run_batch(&args.config, action).await?,
        Service::Scc(action) => run_scc(&args.config, action).await?,
        Service::Talent(action) => run_talent(&args.config, action).await?,
    }
    Ok(())
}

fn enable_tracing(args: &Args) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run_aiplatform(config: &Config, action: AiplatformAction) -> anyhow::Result<()> {
    match action {
        AiplatformAction::Predict {
            publisher,
            model,
            instance,
            parameters,
        } => {
            let client = aiplatform::client(&config.region).await?;
            aiplatform::predict_code_chat(
                &client,
                &config.project_id,
                &config.region,
                &publisher,
                &model,
                &instance,
                &parameters,
            )
            .await?;
        }
    }
    Ok(())
}

async fn run_apikeys(config: &Config, action: ApikeysAction) -> anyhow::Result<()> {
    let client = ApiKeys::builder().with_tracing().build().await?;
    match action {
        ApikeysAction::Restrict { key_id } => {
            let options = config
                .polling_options()?
                .with_maximum_wait(config.max_wait.min(apikeys::DEFAULT_UPDATE_WAIT));
            apikeys::restrict_api_key_server(&client, &config.project_id, &key_id, options)
                .await?;
        }
    }
    Ok(())
}

async fn run_asset(config: &Config, action: AssetAction) -> anyhow::Result<()> {
    let client = AssetService::builder().with_tracing().build().await?;
    match action {
        AssetAction::Create {
            feed_id,
            topic,
            asset_names,
            content_type,
        } => {
            asset::create_feed(
                &client,
                asset_names,
                &feed_id,
                &topic,
                &config.project_id,
                content_type.into(),
            )
            .await?;
        }
        AssetAction::Get { feed_name } => {
            asset::get_feed(&client, &feed_name).await?;
        }
        AssetAction::List => {
            asset::list_feeds(&client, &config.project_id).await?;
        }
        AssetAction::Update { feed_name, topic } => {
            asset::update_feed(&client, &feed_name, &topic).await?;
        }
        AssetAction::Delete { feed_name } => {
            asset::delete_feed(&client, &feed_name).await?;
        }
    }
    Ok(())
}

async fn run_batch(config: &Config, action: BatchAction) -> anyhow::Result<()> {
    let client = BatchService::builder().with_tracing().build().await?;
    let job_name = |job_id: &str| {
        format!(
            "projects/{}/locations/{}/jobs/{job_id}",
            config.project_id, config.region
        )
    };
    match action {
        BatchAction::Create {
            job_id,
            wait,
            shape,
        } => {
            let job = job_shape(config, shape);
            let job =
                batch::create_job(&client, &config.project_id, &config.region, &job_id, job)
                    .await?;
            if wait {
                batch::wait_for_job_completion(&client, &job.name, config.polling_options()?)
                    .await?;
            }
        }
        BatchAction::Get { job_id } => {
            let job = batch::get_job(&client, &job_name(&job_id)).await?;
            println!("{job:#?}");
        }
        BatchAction::Delete { job_id } => {
            batch::delete_job(&client, &job_name(&job_id), config.polling_options()?).await?;
        }
        BatchAction::Wait { job_id } => {
            batch::wait_for_job_completion(&client, &job_name(&job_id), config.polling_options()?)
                .await?;
        }
    }
    Ok(())
}

fn job_shape(config: &Config, shape: JobShape) -> google_cloud_batch_v1::model::Job {
    match shape {
        JobShape::Script => batch::script_job(),
        JobShape::ServiceAccount { email } => batch::service_account_job(&email),
        JobShape::Secret {
            variable_name,
            secret_name,
            version,
        } => batch::secret_manager_job(&config.project_id, &variable_name, &secret_name, &version),
        JobShape::Gpu {
            gpu_type,
            gpu_count,
            install_gpu_drivers,
        } => batch::gpu_job(install_gpu_drivers, &gpu_type, gpu_count),
        JobShape::LocalSsd {
            disk_name,
            disk_size_gb,
            machine_type,
        } => batch::local_ssd_job(&disk_name, disk_size_gb, &machine_type),
        JobShape::PersistentDisk {
            new_disk_name,
            disk_size_gb,
            existing_disk_name,
            disk_type,
        } => batch::persistent_disk_job(
            &config.project_id,
            &new_disk_name,
            disk_size_gb,
            &existing_disk_name,
            &format!("zones/{}", config.zone),
            &disk_type,
        ),
        JobShape::Notification { topic_id } => {
            batch::notification_job(&config.project_id, &topic_id)
        }
        JobShape::CustomEvents => batch::custom_events_job("script 1", "barrier 1", "script 2"),
    }
}

async fn run_scc(config: &Config, action: SccAction) -> anyhow::Result<()> {
    let client = SecurityCenterManagement::builder()
        .with_tracing()
        .build()
        .await?;
    let project_id = config.scc_project_id();
    match action {
        SccAction::Create { display_name } => {
            securitycenter::create_custom_module(&client, project_id, &display_name).await?;
        }
        SccAction::Get { module_id } => {
            securitycenter::get_custom_module(&client, project_id, &module_id).await?;
        }
        SccAction::List => {
            securitycenter::list_custom_modules(&client, project_id).await?;
        }
        SccAction::Update { module_id } => {
            securitycenter::update_custom_module(&client, project_id, &module_id).await?;
        }
        SccAction::Delete { module_id } => {
            securitycenter::delete_custom_module(&client, project_id, &module_id).await?;
        }
        SccAction::GetEffective { module_id } => {
            securitycenter::get_effective_custom_module(&client, project_id, &module_id).await?;
        }
        SccAction::ListEffective => {
            securitycenter::list_effective_custom_modules(&client, project_id).await?;
        }
        SccAction::ListDescendant => {
            securitycenter::list_descendant_custom_modules(&client, project_id).await?;
        }
        SccAction::Simulate => {
            securitycenter::simulate_custom_module(&client, project_id).await?;
        }
        SccAction::Cleanup { prefix } => {
            let deleted = securitycenter::cleanup_custom_modules(&client, project_id, &prefix).await?;
            println!("Deleted {deleted} custom modules");
        }
    }
    Ok(())
}

async fn run_talent(config: &Config, action: TalentAction) -> anyhow::Result<()> {
    let client = CompanyService::builder().with_tracing().build().await?;
    match action {
        TalentAction::ListCompanies { tenant_id } => {
            talent::list_companies(&client, &config.project_id, &tenant_id).await?;
        }
    }
    Ok(())
}
