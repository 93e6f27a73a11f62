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

//! Samples for Cloud Talent Solution.

use crate::Result;
use google_cloud_talent_v4 as talent;

/// Lists all the companies in a tenant.
///
/// Prints the request id of each page, followed by the company names in the
/// page.
pub async fn list_companies(
    client: &talent::client::CompanyService,
    project_id: &str,
    tenant_id: &str,
) -> Result<Vec<talent::model::Company>> {
    let parent = format!("projects/{project_id}/tenants/{tenant_id}");
    let mut companies = Vec::new();
    let mut page_token = String::new();
    loop {
        let response = client
            .list_companies()
            .set_parent(&parent)
            .set_page_token(&page_token)
            .send()
            .await?;
        let request_id = response
            .metadata
            .as_ref()
            .map(|m| m.request_id.as_str())
            .unwrap_or_default();
        println!("Request Id is {request_id}");
        for company in &response.companies {
            println!("{}", company.name);
        }
        companies.extend(response.companies);
        if response.next_page_token.is_empty() {
            break;
        }
        page_token = response.next_page_token;
    }
    Ok(companies)
}
