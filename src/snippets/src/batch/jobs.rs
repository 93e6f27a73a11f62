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

//! Job descriptions for the Batch samples.
//!
//! All the jobs run the same script in four tasks. They differ in how the
//! VMs are provisioned, or in what happens around the script.

use google_cloud_batch_v1 as batch;
use google_cloud_wkt as wkt;
use batch::model::allocation_policy::{
    Accelerator, AttachedDisk, Disk, InstancePolicy, InstancePolicyOrTemplate, LocationPolicy,
};
use batch::model::{
    AllocationPolicy, ComputeResource, Environment, Job, JobNotification, LogsPolicy, Runnable,
    ServiceAccount, TaskGroup, TaskSpec, Volume,
};

pub const SCRIPT: &str = "echo Hello world! This is task ${BATCH_TASK_INDEX}. \
    This job has a total of ${BATCH_TASK_COUNT} tasks.";
pub const TASK_COUNT: i64 = 4;
pub const MACHINE_TYPE: &str = "e2-standard-4";
pub const GPU_MACHINE_TYPE: &str = "n1-standard-16";

fn script(text: &str) -> Runnable {
    Runnable::new().set_script(batch::model::runnable::Script::new().set_text(text))
}

fn task_spec<I>(runnables: I) -> TaskSpec
where
    I: IntoIterator<Item = Runnable>,
{
    TaskSpec::new()
        .set_runnables(runnables)
        // 2 vCPUs and 16 MiB of memory for each task.
        .set_compute_resource(ComputeResource::new().set_cpu_milli(2000).set_memory_mib(16))
        .set_max_retry_count(2)
        .set_max_run_duration(wkt::Duration::clamp(3600, 0))
}

fn instance(policy: InstancePolicy) -> InstancePolicyOrTemplate {
    InstancePolicyOrTemplate::new().set_policy(policy)
}

fn job(task_spec: TaskSpec, allocation_policy: AllocationPolicy) -> Job {
    Job::new()
        .set_task_groups([TaskGroup::new()
            .set_task_spec(task_spec)
            .set_task_count(TASK_COUNT)])
        .set_allocation_policy(allocation_policy)
        .set_labels([("env", "testing"), ("type", "script")])
        .set_logs_policy(
            LogsPolicy::new().set_destination(batch::model::logs_policy::Destination::CloudLogging),
        )
}

fn default_allocation() -> AllocationPolicy {
    AllocationPolicy::new()
        .set_instances([instance(InstancePolicy::new().set_machine_type(MACHINE_TYPE))])
}

/// A job running a shell script.
pub fn script_job() -> Job {
    job(task_spec([script(SCRIPT)]), default_allocation())
}

/// A job whose VMs run as the given service account.
///
/// With an empty `service_account_email` the VMs use the Compute Engine
/// default service account.
pub fn service_account_job(service_account_email: &str) -> Job {
    let allocation = default_allocation()
        .set_service_account(ServiceAccount::new().set_email(service_account_email));
    job(task_spec([script(SCRIPT)]), allocation)
}

/// A job reading a Secret Manager secret into an environment variable.
pub fn secret_manager_job(
    project_id: &str,
    variable_name: &str,
    secret_name: &str,
    version: &str,
) -> Job {
    let secret = format!("projects/{project_id}/secrets/{secret_name}/versions/{version}");
    let spec = task_spec([script(&format!(
        "echo The secret is in ${{{variable_name}}}, not printing it."
    ))])
    .set_environment(Environment::new().set_secret_variables([(variable_name, secret)]));
    job(spec, default_allocation())
}

/// A job running on VMs with GPUs.
pub fn gpu_job(install_gpu_drivers: bool, gpu_type: &str, gpu_count: i64) -> Job {
    let policy = InstancePolicy::new()
        .set_machine_type(GPU_MACHINE_TYPE)
        .set_accelerators([Accelerator::new().set_type(gpu_type).set_count(gpu_count)]);
    let allocation = AllocationPolicy::new().set_instances([
        instance(policy).set_install_gpu_drivers(install_gpu_drivers)
    ]);
    job(task_spec([script(SCRIPT)]), allocation)
}

/// A job using a local SSD, mounted at `/mnt/disks/{disk_name}`.
///
/// Only some machine types support local SSDs, and the disk size must be a
/// multiple of 375 GB.
pub fn local_ssd_job(disk_name: &str, disk_size_gb: i64, machine_type: &str) -> Job {
    let policy = InstancePolicy::new()
        .set_machine_type(machine_type)
        .set_disks([AttachedDisk::new()
            .set_new_disk(Disk::new().set_type("local-ssd").set_size_gb(disk_size_gb))
            .set_device_name(disk_name)]);
    let spec = task_spec([script(SCRIPT)]).set_volumes([volume(disk_name)]);
    job(spec, AllocationPolicy::new().set_instances([instance(policy)]))
}

/// A job using a new and an existing persistent disk.
///
/// `location` is the zone of the existing disk, e.g. `zones/us-central1-a`.
/// The new disk is created in the same zone.
pub fn persistent_disk_job(
    project_id: &str,
    new_disk_name: &str,
    disk_size_gb: i64,
    existing_disk_name: &str,
    location: &str,
    disk_type: &str,
) -> Job {
    let existing = format!("projects/{project_id}/{location}/disks/{existing_disk_name}");
    let policy = InstancePolicy::new().set_disks([
        AttachedDisk::new()
            .set_new_disk(Disk::new().set_type(disk_type).set_size_gb(disk_size_gb))
            .set_device_name(new_disk_name),
        AttachedDisk::new()
            .set_existing_disk(existing)
            .set_device_name(existing_disk_name),
    ]);
    let spec = task_spec([script(SCRIPT)])
        .set_volumes([volume(new_disk_name), volume(existing_disk_name)]);
    let allocation = AllocationPolicy::new()
        .set_instances([instance(policy)])
        .set_location(LocationPolicy::new().set_allowed_locations([location]));
    job(spec, allocation)
}

fn volume(device_name: &str) -> Volume {
    Volume::new()
        .set_device_name(device_name)
        .set_mount_path(format!("/mnt/disks/{device_name}"))
}

/// A job publishing state changes to a Pub/Sub topic.
///
/// The job publishes every change in the job state, and a message for each
/// failed task.
pub fn notification_job(project_id: &str, topic_id: &str) -> Job {
    use batch::model::job_notification::{Message, Type};
    let topic = format!("projects/{project_id}/topics/{topic_id}");
    script_job().set_notifications([
        JobNotification::new()
            .set_pubsub_topic(&topic)
            .set_message(Message::new().set_type(Type::JobStateChanged)),
        JobNotification::new().set_pubsub_topic(&topic).set_message(
            Message::new()
                .set_type(Type::TaskStateChanged)
                .set_new_task_state(batch::model::task_status::State::Failed),
        ),
    ])
}

/// A job whose runnables report custom status events.
pub fn custom_events_job(
    script_name: &str,
    barrier_name: &str,
    second_script_name: &str,
) -> Job {
    let barrier = Runnable::new()
        .set_barrier(batch::model::runnable::Barrier::new().set_name(barrier_name))
        .set_display_name(barrier_name);
    let runnables = [
        script("sleep 30; echo '{\"batch/custom/event\": \"EVENT_DESCRIPTION\"}'; sleep 30")
            .set_display_name(script_name),
        barrier,
        script("echo Hello world from task ${BATCH_TASK_INDEX}.").set_display_name(second_script_name),
    ];
    job(task_spec(runnables), default_allocation())
}
