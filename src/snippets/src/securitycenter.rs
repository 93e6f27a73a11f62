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

//! Samples for Security Health Analytics custom modules.
//!
//! A custom module is a detector, defined by a CEL expression, that Security
//! Command Center evaluates against the resources in a project, folder, or
//! organization. These samples manage custom modules at the project level.

use crate::Result;
use gax::paginator::ItemPaginator as _;
use google_cloud_gax as gax;
use google_cloud_securitycentermanagement_v1 as scc;
use google_cloud_type as gtype;
use google_cloud_wkt as wkt;
use scc::model::custom_config::{ResourceSelector, Severity};
use scc::model::security_health_analytics_custom_module::EnablementState;
use scc::model::{
    CustomConfig, EffectiveSecurityHealthAnalyticsCustomModule,
    SecurityHealthAnalyticsCustomModule, SimulateSecurityHealthAnalyticsCustomModuleResponse,
};

/// The display name prefix for custom modules created by these samples.
///
/// [cleanup_custom_modules] deletes modules with this prefix.
pub const DISPLAY_NAME_PREFIX: &str = "rust_sample_custom_module";

/// Keys whose rotation period exceeds 30 days are findings.
const PREDICATE: &str =
    "has(resource.rotationPeriod) && (resource.rotationPeriod > duration('2592000s'))";
const RESOURCE_TYPE: &str = "cloudkms.googleapis.com/CryptoKey";

fn parent(project_id: &str) -> String {
    format!("projects/{project_id}/locations/global")
}

fn module_name(project_id: &str, module_id: &str) -> String {
    format!(
        "{}/securityHealthAnalyticsCustomModules/{module_id}",
        parent(project_id)
    )
}

fn custom_config() -> CustomConfig {
    let predicate = gtype::model::Expr::new()
        .set_expression(PREDICATE)
        .set_title("Purpose of the expression")
        .set_description("description of the expression");
    CustomConfig::new()
        .set_predicate(predicate)
        .set_resource_selector(ResourceSelector::new().set_resource_types([RESOURCE_TYPE]))
        .set_severity(Severity::Medium)
        .set_description("add your description here")
        .set_recommendation("add your recommendation here")
}

/// Returns the custom module id, the last segment of its full name.
///
/// Returns an empty string if `full_name` has no id.
///
/// # Example
/// ```
/// # use cloud_snippets::securitycenter::extract_custom_module_id;
/// let name = "projects/p/locations/global/securityHealthAnalyticsCustomModules/123";
/// assert_eq!(extract_custom_module_id(name), "123");
/// assert_eq!(extract_custom_module_id(""), "");
/// ```
pub fn extract_custom_module_id(full_name: &str) -> &str {
    full_name
        .rsplit_once('/')
        .map(|(_, id)| id)
        .unwrap_or_default()
}

/// Creates an enabled custom module detecting keys with long rotation periods.
pub async fn create_custom_module(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
    display_name: &str,
) -> Result<SecurityHealthAnalyticsCustomModule> {
    let module = SecurityHealthAnalyticsCustomModule::new()
        .set_display_name(display_name)
        .set_enablement_state(EnablementState::Enabled)
        .set_custom_config(custom_config());
    let module = client
        .create_security_health_analytics_custom_module()
        .set_parent(parent(project_id))
        .set_security_health_analytics_custom_module(module)
        .send()
        .await?;
    println!("Created custom module: {}", module.name);
    Ok(module)
}

pub async fn get_custom_module(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
    module_id: &str,
) -> Result<SecurityHealthAnalyticsCustomModule> {
    let module = client
        .get_security_health_analytics_custom_module()
        .set_name(module_name(project_id, module_id))
        .send()
        .await?;
    println!("Custom module: {module:?}");
    Ok(module)
}

/// Lists the custom modules created at the project level.
pub async fn list_custom_modules(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
) -> Result<Vec<SecurityHealthAnalyticsCustomModule>> {
    let mut modules = Vec::new();
    let mut items = client
        .list_security_health_analytics_custom_modules()
        .set_parent(parent(project_id))
        .by_item();
    while let Some(module) = items.next().await.transpose()? {
        println!("Custom module: {}", module.name);
        modules.push(module);
    }
    Ok(modules)
}

/// Disables a custom module.
pub async fn update_custom_module(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
    module_id: &str,
) -> Result<SecurityHealthAnalyticsCustomModule> {
    let module = SecurityHealthAnalyticsCustomModule::new()
        .set_name(module_name(project_id, module_id))
        .set_enablement_state(EnablementState::Disabled);
    let module = client
        .update_security_health_analytics_custom_module()
        .set_security_health_analytics_custom_module(module)
        .set_update_mask(wkt::FieldMask::default().set_paths(["enablement_state"]))
        .send()
        .await?;
    println!(
        "Updated custom module {}, enablement state is {:?}",
        module.name, module.enablement_state
    );
    Ok(module)
}

pub async fn delete_custom_module(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
    module_id: &str,
) -> Result<()> {
    let name = module_name(project_id, module_id);
    client
        .delete_security_health_analytics_custom_module()
        .set_name(&name)
        .send()
        .await?;
    println!("Deleted custom module: {name}");
    Ok(())
}

/// Gets the effective custom module, that is, the module with the settings
/// inherited from parent folders and organizations.
pub async fn get_effective_custom_module(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
    module_id: &str,
) -> Result<EffectiveSecurityHealthAnalyticsCustomModule> {
    let name = format!(
        "{}/effectiveSecurityHealthAnalyticsCustomModules/{module_id}",
        parent(project_id)
    );
    let module = client
        .get_effective_security_health_analytics_custom_module()
        .set_name(name)
        .send()
        .await?;
    println!("Effective custom module: {module:?}");
    Ok(module)
}

pub async fn list_effective_custom_modules(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
) -> Result<Vec<EffectiveSecurityHealthAnalyticsCustomModule>> {
    let mut modules = Vec::new();
    let mut items = client
        .list_effective_security_health_analytics_custom_modules()
        .set_parent(parent(project_id))
        .by_item();
    while let Some(module) = items.next().await.transpose()? {
        println!("Effective custom module: {}", module.name);
        modules.push(module);
    }
    Ok(modules)
}

/// Lists the custom modules in the project and in its descendants.
pub async fn list_descendant_custom_modules(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
) -> Result<Vec<SecurityHealthAnalyticsCustomModule>> {
    let mut modules = Vec::new();
    let mut items = client
        .list_descendant_security_health_analytics_custom_modules()
        .set_parent(parent(project_id))
        .by_item();
    while let Some(module) = items.next().await.transpose()? {
        println!("Descendant custom module: {}", module.name);
        modules.push(module);
    }
    Ok(modules)
}

/// Evaluates the custom module configuration against a simulated key.
///
/// The simulated key rotates every 30 days, so the result is no violation.
pub async fn simulate_custom_module(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
) -> Result<SimulateSecurityHealthAnalyticsCustomModuleResponse> {
    use scc::model::simulate_security_health_analytics_custom_module_request::SimulatedResource;
    let data = wkt::Struct::from_iter([
        (
            "resourceName".to_string(),
            wkt::Value::from(format!(
                "projects/{project_id}/locations/global/keyRings/sample-ring/cryptoKeys/sample-key"
            )),
        ),
        ("rotationPeriod".to_string(), wkt::Value::from("2592000s")),
    ]);
    let resource = SimulatedResource::new()
        .set_resource_type(RESOURCE_TYPE)
        .set_resource_data(data);
    let response = client
        .simulate_security_health_analytics_custom_module()
        .set_parent(parent(project_id))
        .set_custom_config(custom_config())
        .set_resource(resource)
        .send()
        .await?;
    println!("Simulation result: {:?}", response.result);
    Ok(response)
}

/// Deletes the project-level custom modules whose display name starts with
/// `prefix`. Returns the number of deleted modules.
pub async fn cleanup_custom_modules(
    client: &scc::client::SecurityCenterManagement,
    project_id: &str,
    prefix: &str,
) -> Result<usize> {
    let mut deleted = 0;
    let modules = list_custom_modules(client, project_id).await?;
    for module in modules
        .iter()
        .filter(|m| m.display_name.starts_with(prefix))
    {
        let id = extract_custom_module_id(&module.name);
        if id.is_empty() {
            continue;
        }
        match delete_custom_module(client, project_id, id).await {
            Ok(()) => deleted += 1,
            Err(e) => tracing::warn!("cannot delete custom module {}: {e}", module.name),
        }
    }
    Ok(deleted)
}
