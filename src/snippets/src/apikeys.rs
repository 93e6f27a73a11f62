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

//! Samples for the API Keys service.

use crate::Result;
use crate::polling::wait_for_operation;
use google_cloud_apikeys_v2 as apikeys;
use google_cloud_wkt as wkt;
use std::time::Duration;

/// The IP ranges allowed to use the restricted key. These are documentation
/// ranges, replace them with the addresses of your servers.
pub const ALLOWED_IPS: [&str; 2] = ["198.51.100.0/24", "2000:db8::/64"];

/// How long [restrict_api_key_server] waits for the update by default.
pub const DEFAULT_UPDATE_WAIT: Duration = Duration::from_secs(180);

/// The default polling options for [restrict_api_key_server].
pub fn default_polling_options() -> lro::PollingOptions {
    lro::PollingOptions::default().with_maximum_wait(DEFAULT_UPDATE_WAIT)
}

/// Restricts an API key to callers from a set of IP addresses.
///
/// The update is a long-running operation, this function waits until it
/// completes or `options` gives up.
pub async fn restrict_api_key_server(
    client: &apikeys::client::ApiKeys,
    project_id: &str,
    key_id: &str,
    options: lro::PollingOptions,
) -> Result<apikeys::model::Key> {
    let restrictions = apikeys::model::Restrictions::new().set_server_key_restrictions(
        apikeys::model::ServerKeyRestrictions::new().set_allowed_ips(ALLOWED_IPS),
    );
    let key = apikeys::model::Key::new()
        .set_name(format!("projects/{project_id}/locations/global/keys/{key_id}"))
        .set_restrictions(restrictions);

    let operation = client
        .update_key()
        .set_key(key)
        .set_update_mask(wkt::FieldMask::default().set_paths(["restrictions"]))
        .send()
        .await?;
    tracing::info!("waiting for operation {}", operation.name);

    let key = wait_for_operation::<apikeys::model::Key, _, _>(
        options,
        operation.name,
        |name| async move { client.get_operation().set_name(name).send().await },
    )
    .await?;
    println!("Successfully updated the API key: {}", key.name);
    Ok(key)
}
