use reqwest::{header, Client};
use url::Url;

use crate::error::SyncError;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ChunabLiveBot/1.0)";

const ERROR_BODY_CHARS: usize = 200;

// Operators sometimes paste the whole `KEY=value` line as the value.
const PASTED_PREFIX: &str = "TARGET_URL=";

pub fn sanitize_target_url(raw: &str) -> Result<Url, SyncError> {
    let trimmed = raw.trim();
    let cleaned = match trimmed.get(..PASTED_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(PASTED_PREFIX) => {
            trimmed[PASTED_PREFIX.len()..].trim()
        }
        _ => trimmed,
    };

    Url::parse(cleaned).map_err(|source| SyncError::InvalidUrl {
        url: cleaned.to_string(),
        source,
    })
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Fetcher { client }
    }

    pub async fn fetch_text(&self, url: &Url) -> Result<String, SyncError> {
        let res = self
            .client
            .get(url.clone())
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            log::error!("Fetch of {} returned {}", url, status);
            return Err(SyncError::FetchStatus {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_CHARS).collect(),
            });
        }

        log::info!("Fetched {} bytes from {}", text.len(), url);
        Ok(text)
    }
}
