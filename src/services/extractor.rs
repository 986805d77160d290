use url::Url;

use crate::{
    configuration::SourceFormat,
    domain::{
        election_row::{
            change_material, format_election_message, parse_election_rows, summarize_top_rows,
        },
        page_snapshot::PageSnapshot,
    },
    error::SyncError,
};

/// What the pipeline needs out of a fetched body.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Hashed for change detection.
    pub change_material: String,
    /// Posted as-is.
    pub message: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, body: &str) -> Result<Extraction, SyncError>;
}

/// JSON feed of election rows.
pub struct ElectionFeedExtractor;

impl Extractor for ElectionFeedExtractor {
    fn extract(&self, body: &str) -> Result<Extraction, SyncError> {
        let rows = parse_election_rows(body)?;
        let summaries = summarize_top_rows(&rows);

        log::info!("Summarized {} of {} rows", summaries.len(), rows.len());

        Ok(Extraction {
            change_material: change_material(&summaries),
            message: format_election_message(&summaries),
        })
    }
}

pub struct PageScrapeExtractor {
    source_url: String,
}

impl PageScrapeExtractor {
    pub fn new(source_url: &Url) -> Self {
        PageScrapeExtractor {
            source_url: source_url.to_string(),
        }
    }
}

impl Extractor for PageScrapeExtractor {
    fn extract(&self, body: &str) -> Result<Extraction, SyncError> {
        let snapshot = PageSnapshot::from_html(body);

        log::info!("Scraped page titled {:?}", snapshot.title);

        Ok(Extraction {
            change_material: snapshot.change_material()?,
            message: snapshot.format_message(&self.source_url),
        })
    }
}

pub fn extractor_for(format: SourceFormat, source_url: &Url) -> Box<dyn Extractor> {
    match format {
        SourceFormat::Json => Box::new(ElectionFeedExtractor),
        SourceFormat::Html => Box::new(PageScrapeExtractor::new(source_url)),
    }
}
