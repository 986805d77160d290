use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::error::SyncError;

pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v21.0";
pub const DEFAULT_STATE_PATH: &str = "state.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Html,
}

impl TryFrom<&str> for SourceFormat {
    type Error = SyncError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "html" => Ok(SourceFormat::Html),
            other => Err(SyncError::UnknownSourceFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub target_url: String,
    pub page_id: String,
    pub page_access_token: String,
    pub source_format: SourceFormat,
    pub state_path: PathBuf,
    pub graph_api_base: String,
}

/// Keys as they come out of the environment: `TARGET_URL` -> `target_url`.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    target_url: Option<String>,
    fb_page_id: Option<String>,
    fb_page_access_token: Option<String>,
    source_format: Option<String>,
    state_path: Option<String>,
    graph_api_base: Option<String>,
}

/// Reads `.env` (if any), an optional `configuration.*` file and the process
/// environment, the environment winning.
pub fn get_configuration() -> Result<Settings, SyncError> {
    _ = dotenvy::dotenv();

    let builder = Config::builder()
        .add_source(File::with_name("configuration").required(false))
        .add_source(Environment::default());

    build_settings(builder)
}

/// Same as [`get_configuration`] but from an explicit variable map instead of
/// the process environment.
pub fn settings_from_vars<'a>(
    vars: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<Settings, SyncError> {
    let vars: config::Map<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    build_settings(Config::builder().add_source(Environment::default().source(Some(vars))))
}

fn build_settings(builder: ConfigBuilder<DefaultState>) -> Result<Settings, SyncError> {
    let raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.validate()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawSettings {
    fn validate(self) -> Result<Settings, SyncError> {
        let required = (
            non_empty(self.target_url),
            non_empty(self.fb_page_id),
            non_empty(self.fb_page_access_token),
        );

        let (target_url, page_id, page_access_token) = match required {
            (Some(url), Some(id), Some(token)) => (url, id, token),
            (url, id, token) => {
                let missing = [
                    ("TARGET_URL", url.is_none()),
                    ("FB_PAGE_ID", id.is_none()),
                    ("FB_PAGE_ACCESS_TOKEN", token.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(SyncError::MissingSettings(missing));
            }
        };

        let source_format = match non_empty(self.source_format) {
            Some(format) => SourceFormat::try_from(format.as_str())?,
            None => SourceFormat::Json,
        };

        Ok(Settings {
            target_url,
            page_id,
            page_access_token,
            source_format,
            state_path: non_empty(self.state_path)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
            graph_api_base: non_empty(self.graph_api_base)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GRAPH_API_BASE.to_string()),
        })
    }
}
