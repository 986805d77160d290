use reqwest::Client;
use serde_json::Value;

use crate::error::SyncError;

/// Posts to a page feed on the Graph API. One attempt, no retry.
pub struct GraphPublisher {
    client: Client,
    feed_url: String,
    access_token: String,
}

impl GraphPublisher {
    pub fn new(client: Client, graph_api_base: &str, page_id: &str, access_token: String) -> Self {
        GraphPublisher {
            client,
            feed_url: format!("{}/{}/feed", graph_api_base.trim_end_matches('/'), page_id),
            access_token,
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub async fn publish(&self, message: &str) -> Result<Value, SyncError> {
        let form = [
            ("message", message),
            ("access_token", self.access_token.as_str()),
        ];

        let res = self.client.post(&self.feed_url).form(&form).send().await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            let body = match serde_json::from_str::<Value>(&text) {
                Ok(json) => json.to_string(),
                Err(_) => text,
            };
            log::error!("Graph API returned {}: {}", status, body);
            return Err(SyncError::PublishStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
