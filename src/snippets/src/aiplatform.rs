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

//! Samples for Vertex AI online prediction.

use crate::Result;
use google_cloud_aiplatform_v1 as aiplatform;
use google_cloud_wkt as wkt;

pub const DEFAULT_PUBLISHER: &str = "google";
pub const DEFAULT_MODEL: &str = "codechat-bison@001";

/// A code chat conversation, in the format expected by the code chat models.
pub const DEFAULT_INSTANCE: &str = r#"{ "messages": [
  { "author": "user", "content": "Hi, how are you?" },
  { "author": "system", "content": "I am doing good. What can I help you in the coding world?" },
  { "author": "user", "content": "Please help write a function to calculate the min of two numbers." }
]}"#;

pub const DEFAULT_PARAMETERS: &str = r#"{ "temperature": 0.5, "maxOutputTokens": 1024 }"#;

/// Returns the regional endpoint for prediction requests in `location`.
///
/// Publisher models are served from regional endpoints only.
pub fn regional_endpoint(location: &str) -> String {
    format!("https://{location}-aiplatform.googleapis.com")
}

/// Creates a prediction client using the regional endpoint for `location`.
pub async fn client(location: &str) -> Result<aiplatform::client::PredictionService> {
    let client = aiplatform::client::PredictionService::builder()
        .with_endpoint(regional_endpoint(location))
        .with_tracing()
        .build()
        .await?;
    Ok(client)
}

/// Parses a JSON string into a [wkt::Value].
pub fn string_to_value(value: &str) -> Result<wkt::Value> {
    let value = serde_json::from_str::<wkt::Value>(value)?;
    Ok(value)
}

/// Uses a code chat model to generate a function.
///
/// `instance` and `parameters` are JSON strings, see [DEFAULT_INSTANCE] and
/// [DEFAULT_PARAMETERS] for examples.
pub async fn predict_code_chat(
    client: &aiplatform::client::PredictionService,
    project_id: &str,
    location: &str,
    publisher: &str,
    model: &str,
    instance: &str,
    parameters: &str,
) -> Result<aiplatform::model::PredictResponse> {
    let instance = string_to_value(instance)?;
    let parameters = string_to_value(parameters)?;
    let endpoint =
        format!("projects/{project_id}/locations/{location}/publishers/{publisher}/models/{model}");
    tracing::info!("sending prediction request to {endpoint}");

    let response = client
        .predict()
        .set_endpoint(endpoint)
        .set_instances([instance])
        .set_parameters(parameters)
        .send()
        .await?;
    println!("Predict Response");
    println!("{response:#?}");
    Ok(response)
}
