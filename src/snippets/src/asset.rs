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

//! Samples for Cloud Asset Inventory real-time feeds.

use crate::Result;
use google_cloud_asset_v1 as asset;
use google_cloud_wkt as wkt;

pub use asset::model::ContentType;

fn output_config(topic: &str) -> asset::model::FeedOutputConfig {
    asset::model::FeedOutputConfig::new()
        .set_pubsub_destination(asset::model::PubsubDestination::new().set_topic(topic))
}

/// Creates a feed publishing changes for `asset_names` to a Pub/Sub topic.
///
/// `topic` is the full topic name, e.g. `projects/my-project/topics/my-topic`.
pub async fn create_feed<I, S>(
    client: &asset::client::AssetService,
    asset_names: I,
    feed_id: &str,
    topic: &str,
    project_id: &str,
    content_type: ContentType,
) -> Result<asset::model::Feed>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let feed = asset::model::Feed::new()
        .set_asset_names(asset_names)
        .set_content_type(content_type)
        .set_feed_output_config(output_config(topic));
    let feed = client
        .create_feed()
        .set_parent(format!("projects/{project_id}"))
        .set_feed_id(feed_id)
        .set_feed(feed)
        .send()
        .await?;
    println!("Feed created successfully: {}", feed.name);
    Ok(feed)
}

/// Gets a feed by its full name, e.g. `projects/123/feeds/my-feed`.
pub async fn get_feed(
    client: &asset::client::AssetService,
    feed_name: &str,
) -> Result<asset::model::Feed> {
    let feed = client.get_feed().set_name(feed_name).send().await?;
    println!("Get a feed: {}", feed.name);
    Ok(feed)
}

/// Lists the feeds in a project.
pub async fn list_feeds(
    client: &asset::client::AssetService,
    project_id: &str,
) -> Result<Vec<asset::model::Feed>> {
    let response = client
        .list_feeds()
        .set_parent(format!("projects/{project_id}"))
        .send()
        .await?;
    println!("Listed feeds under: {project_id}");
    for feed in &response.feeds {
        println!("  {}", feed.name);
    }
    Ok(response.feeds)
}

/// Changes the Pub/Sub topic of an existing feed.
pub async fn update_feed(
    client: &asset::client::AssetService,
    feed_name: &str,
    topic: &str,
) -> Result<asset::model::Feed> {
    let feed = asset::model::Feed::new()
        .set_name(feed_name)
        .set_feed_output_config(output_config(topic));
    let feed = client
        .update_feed()
        .set_feed(feed)
        .set_update_mask(
            wkt::FieldMask::default().set_paths(["feed_output_config.pubsub_destination.topic"]),
        )
        .send()
        .await?;
    println!("Feed updated successfully: {}", feed.name);
    Ok(feed)
}

/// Deletes a feed.
pub async fn delete_feed(client: &asset::client::AssetService, feed_name: &str) -> Result<()> {
    client.delete_feed().set_name(feed_name).send().await?;
    println!("Feed deleted");
    Ok(())
}
