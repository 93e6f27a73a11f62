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

use batch::model::Job;
use batch::model::job_status::State;
use crate::Result;
use crate::polling::{classify, wait_for_operation};
use google_cloud_batch_v1 as batch;
use google_cloud_wkt as wkt;
use lro::OperationStatus;

/// The error reported when a Batch job reaches the `FAILED` state.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("job {name} failed: {}", .events.join("; "))]
pub struct JobFailed {
    pub name: String,
    /// The descriptions of the job status events, oldest first.
    pub events: Vec<String>,
}

/// Creates a Batch job in `projects/{project_id}/locations/{region}`.
pub async fn create_job(
    client: &batch::client::BatchService,
    project_id: &str,
    region: &str,
    job_id: &str,
    job: Job,
) -> Result<Job> {
    let job = client
        .create_job()
        .set_parent(format!("projects/{project_id}/locations/{region}"))
        .set_job_id(job_id)
        .set_job(job)
        .send()
        .await?;
    println!("Successfully created the job: {}", job.name);
    Ok(job)
}

/// Gets a job by its full name.
pub async fn get_job(client: &batch::client::BatchService, job_name: &str) -> Result<Job> {
    let job = client.get_job().set_name(job_name).send().await?;
    Ok(job)
}

/// Deletes a job and waits until the deletion completes.
pub async fn delete_job(
    client: &batch::client::BatchService,
    job_name: &str,
    options: lro::PollingOptions,
) -> Result<()> {
    let operation = client.delete_job().set_name(job_name).send().await?;
    tracing::info!("waiting for operation {} to delete {job_name}", operation.name);
    wait_for_operation::<wkt::Empty, _, _>(options, operation.name, |name| async move {
        client.get_operation().set_name(name).send().await
    })
    .await?;
    println!("Successfully deleted the job: {job_name}");
    Ok(())
}

/// Maps the state of a Batch job to an [OperationStatus].
///
/// Queued and scheduled jobs are `Pending`. Jobs being deleted and jobs in
/// unknown states are `Running`, the deadline eventually stops the poller.
pub fn job_status(job: Job) -> OperationStatus<Job> {
    let state = job
        .status
        .as_ref()
        .map(|s| s.state.clone())
        .unwrap_or(State::Unspecified);
    match state {
        State::Succeeded => OperationStatus::Succeeded(job),
        State::Failed => {
            let events = job
                .status
                .map(|s| s.status_events.into_iter().map(|e| e.description).collect())
                .unwrap_or_default();
            OperationStatus::failed(JobFailed {
                name: job.name,
                events,
            })
        }
        State::Unspecified | State::Queued | State::Scheduled => OperationStatus::Pending,
        _ => OperationStatus::Running,
    }
}

/// Waits until the job reaches the `SUCCEEDED` or `FAILED` state.
///
/// A job in the `FAILED` state produces an error where
/// [is_operation_failed][lro::Error::is_operation_failed] is `true`.
pub async fn wait_for_job_completion(
    client: &batch::client::BatchService,
    job_name: &str,
    options: lro::PollingOptions,
) -> Result<Job> {
    let fetch = |name: String| async move {
        let job = client
            .get_job()
            .set_name(name)
            .send()
            .await
            .map_err(classify)?;
        tracing::debug!("job {} is {:?}", job.name, job.status.as_ref().map(|s| &s.state));
        Ok::<_, lro::Error>(job_status(job))
    };
    let job = lro::poll_until_terminal(options, job_name.to_string(), fetch).await?;
    println!("Job {} completed", job.name);
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polling::tests::{done_with_response, service_error};
    use batch::model::{CreateJobRequest, DeleteJobRequest, GetJobRequest, JobStatus, StatusEvent};
    use google_cloud_gax as gax;
    use google_cloud_gax::error::rpc::Code;
    use google_cloud_gax::response::Response;
    use google_cloud_longrunning::model::{GetOperationRequest, Operation};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    mockall::mock! {
        #[derive(Debug)]
        BatchService {}
        impl batch::stub::BatchService for BatchService {
            async fn create_job(&self, req: CreateJobRequest, _options: gax::options::RequestOptions) -> gax::Result<Response<Job>>;
            async fn get_job(&self, req: GetJobRequest, _options: gax::options::RequestOptions) -> gax::Result<Response<Job>>;
            async fn delete_job(&self, req: DeleteJobRequest, _options: gax::options::RequestOptions) -> gax::Result<Response<Operation>>;
            async fn get_operation(&self, req: GetOperationRequest, _options: gax::options::RequestOptions) -> gax::Result<Response<Operation>>;
        }
    }

    const JOB_NAME: &str = "projects/my-project/locations/us-central1/jobs/my-job";

    fn job_in(state: State) -> Job {
        Job::new()
            .set_name(JOB_NAME)
            .set_status(JobStatus::new().set_state(state))
    }

    fn options() -> lro::PollingOptions {
        lro::PollingOptions::default()
            .with_maximum_wait(Duration::from_secs(600))
            .with_backoff_policy(lro::ExponentialBackoff::fixed(Duration::from_secs(10)))
    }

    #[test_case::test_case(State::Unspecified, lro::OperationState::Pending)]
    #[test_case::test_case(State::Queued, lro::OperationState::Pending)]
    #[test_case::test_case(State::Scheduled, lro::OperationState::Pending)]
    #[test_case::test_case(State::Running, lro::OperationState::Running)]
    #[test_case::test_case(State::DeletionInProgress, lro::OperationState::Running)]
    #[test_case::test_case(State::Succeeded, lro::OperationState::Succeeded)]
    #[test_case::test_case(State::Failed, lro::OperationState::Failed)]
    fn status_mapping(state: State, want: lro::OperationState) {
        let got = job_status(job_in(state));
        assert_eq!(got.state(), want, "{got:?}");
    }

    #[test]
    fn status_without_status() {
        let got = job_status(Job::new().set_name(JOB_NAME));
        assert_eq!(got.state(), lro::OperationState::Pending, "{got:?}");
    }

    #[test]
    fn failed_job_events() {
        let job = Job::new().set_name(JOB_NAME).set_status(
            JobStatus::new().set_state(State::Failed).set_status_events([
                StatusEvent::new().set_description("Job state is set from QUEUED to SCHEDULED"),
                StatusEvent::new().set_description("Job state is set from RUNNING to FAILED"),
            ]),
        );
        let OperationStatus::Failed(error) = job_status(job) else {
            panic!("expected a failed status");
        };
        let got = error.downcast_ref::<JobFailed>().cloned();
        assert_eq!(
            got,
            Some(JobFailed {
                name: JOB_NAME.to_string(),
                events: vec![
                    "Job state is set from QUEUED to SCHEDULED".to_string(),
                    "Job state is set from RUNNING to FAILED".to_string(),
                ],
            })
        );
    }

    #[tokio::test]
    async fn create() -> anyhow::Result<()> {
        let mut mock = MockBatchService::new();
        mock.expect_create_job().return_once(|r, _| {
            assert_eq!(r.parent, "projects/my-project/locations/us-central1");
            assert_eq!(r.job_id, "my-job");
            let job = r.job.expect("request has a job");
            assert_eq!(job.task_groups.len(), 1);
            Ok(Response::from(job.set_name(JOB_NAME)))
        });
        let client = batch::client::BatchService::from_stub(mock);
        let job = create_job(&client, "my-project", "us-central1", "my-job", crate::batch::script_job())
            .await?;
        assert_eq!(job.name, JOB_NAME);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn wait_until_succeeded() -> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockBatchService::new();
        for state in [State::Queued, State::Scheduled, State::Running, State::Succeeded] {
            mock.expect_get_job()
                .once()
                .in_sequence(&mut seq)
                .withf(|r, _| r.name == JOB_NAME)
                .returning(move |_, _| Ok(Response::from(job_in(state.clone()))));
        }
        let client = batch::client::BatchService::from_stub(mock);
        let start = tokio::time::Instant::now();
        let job = wait_for_job_completion(&client, JOB_NAME, options()).await?;
        assert_eq!(job.name, JOB_NAME);
        assert_eq!(start.elapsed(), Duration::from_secs(30));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn wait_until_failed() {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockBatchService::new();
        mock.expect_get_job()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Response::from(job_in(State::Running))));
        mock.expect_get_job()
            .once()
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Response::from(job_in(State::Failed))));
        let client = batch::client::BatchService::from_stub(mock);
        let got = wait_for_job_completion(&client, JOB_NAME, options()).await;
        let failed = got
            .as_ref()
            .err()
            .and_then(|e| e.as_polling())
            .map(|e| e.is_operation_failed());
        assert_eq!(failed, Some(true), "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn wait_missing_job() {
        let mut mock = MockBatchService::new();
        mock.expect_get_job()
            .once()
            .returning(|_, _| Err(service_error(Code::NotFound)));
        let client = batch::client::BatchService::from_stub(mock);
        let start = tokio::time::Instant::now();
        let got = wait_for_job_completion(&client, JOB_NAME, options()).await;
        let not_found = got
            .as_ref()
            .err()
            .and_then(|e| e.as_polling())
            .map(|e| e.is_not_found());
        assert_eq!(not_found, Some(true), "{got:?}");
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_times_out() {
        let mut mock = MockBatchService::new();
        mock.expect_get_job()
            .times(60)
            .returning(|_, _| Ok(Response::from(job_in(State::Running))));
        let client = batch::client::BatchService::from_stub(mock);
        let got = wait_for_job_completion(&client, JOB_NAME, options()).await;
        let timeout = got
            .as_ref()
            .err()
            .and_then(|e| e.as_polling())
            .map(|e| e.is_timeout());
        assert_eq!(timeout, Some(true), "{got:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn delete() -> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockBatchService::new();
        mock.expect_delete_job()
            .once()
            .in_sequence(&mut seq)
            .withf(|r, _| r.name == JOB_NAME)
            .returning(|_, _| Ok(Response::from(Operation::new().set_name("operations/delete-123"))));
        mock.expect_get_operation()
            .once()
            .in_sequence(&mut seq)
            .returning(|r, _| Ok(Response::from(Operation::new().set_name(r.name))));
        mock.expect_get_operation()
            .once()
            .in_sequence(&mut seq)
            .withf(|r, _| r.name == "operations/delete-123")
            .returning(|r, _| Ok(Response::from(done_with_response(&r.name, &wkt::Empty::default()))));
        let client = batch::client::BatchService::from_stub(mock);
        delete_job(&client, JOB_NAME, options()).await?;
        Ok(())
    }
}
