use url::Url;

use crate::{
    dal::StateStore,
    domain::content_hash::generate_content_hash,
    error::SyncError,
};

use super::{Extractor, Fetcher, GraphPublisher};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped {
        hash: String,
    },
    Published {
        hash: String,
        post_id: Option<String>,
    },
}

pub struct SyncJob<S: StateStore> {
    source_url: Url,
    fetcher: Fetcher,
    extractor: Box<dyn Extractor>,
    publisher: GraphPublisher,
    store: S,
}

impl<S: StateStore> SyncJob<S> {
    pub fn new(
        source_url: Url,
        fetcher: Fetcher,
        extractor: Box<dyn Extractor>,
        publisher: GraphPublisher,
        store: S,
    ) -> Self {
        SyncJob {
            source_url,
            fetcher,
            extractor,
            publisher,
            store,
        }
    }

    /// One pass: fetch, compare against the stored hash, post if it moved.
    /// State is only written after the post went through.
    pub async fn run(&self) -> Result<SyncOutcome, SyncError> {
        let mut state = self.store.load();

        let body = self.fetcher.fetch_text(&self.source_url).await?;
        let extraction = self.extractor.extract(&body)?;
        let current_hash = generate_content_hash(&extraction.change_material);

        if state.is_unchanged(&current_hash) {
            log::info!("No change detected. Skipping post.");
            return Ok(SyncOutcome::Skipped { hash: current_hash });
        }

        log::info!("Content changed ({}), posting to {}", current_hash, self.publisher.feed_url());
        let receipt = self.publisher.publish(&extraction.message).await?;
        log::info!("Posted: {}", receipt);

        state.last_hash = current_hash.clone();
        self.store.save(&state)?;

        Ok(SyncOutcome::Published {
            hash: current_hash,
            post_id: receipt
                .get("id")
                .and_then(|id| id.as_str())
                .map(|id| id.to_string()),
        })
    }
}
