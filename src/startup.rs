use reqwest::Client;

use crate::{
    configuration::Settings,
    dal::FileStateStore,
    error::SyncError,
    services::{extractor_for, sanitize_target_url, Fetcher, GraphPublisher, SyncJob},
};

pub fn build_job(settings: &Settings) -> Result<SyncJob<FileStateStore>, SyncError> {
    let source_url = sanitize_target_url(&settings.target_url)?;
    let client = Client::new();

    let extractor = extractor_for(settings.source_format, &source_url);
    let publisher = GraphPublisher::new(
        client.clone(),
        &settings.graph_api_base,
        &settings.page_id,
        settings.page_access_token.clone(),
    );
    let store = FileStateStore::new(&settings.state_path);

    log::info!(
        "Syncing {} ({:?}) with state at {}",
        source_url,
        settings.source_format,
        settings.state_path.display()
    );

    Ok(SyncJob::new(
        source_url,
        Fetcher::new(client),
        extractor,
        publisher,
        store,
    ))
}
