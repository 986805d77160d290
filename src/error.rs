use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Missing env vars: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    #[error("Failed to read configuration: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Unknown source format: {0} (expected json or html)")]
    UnknownSourceFormat(String),

    #[error("Invalid target url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Fetch failed {status}: {body}")]
    FetchStatus { status: u16, body: String },

    #[error("Unknown election data format")]
    UnknownFormat,

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("FB post failed ({status}): {body}")]
    PublishStatus { status: u16, body: String },

    #[error("Failed to write state: {0}")]
    StateWrite(#[from] std::io::Error),
}
