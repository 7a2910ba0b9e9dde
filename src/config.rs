use std::path::PathBuf;
use std::time::Duration;

use ::config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

pub const OVERVIEW_URL: &str = "https://developers.google.com/google-ads/api/fields/v17/overview";
pub const SCHEMA_BASE_URL: &str = "https://gaql-query-builder.uc.r.appspot.com";
pub const SCHEMA_VERSION: &str = "v17";
pub const SNAPSHOT_PATH: &str = "data/resources.json";
pub const BATCH_SIZE: usize = 5;
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Where the catalog comes from for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Scrape, enrich and persist a fresh catalog.
    Live,
    /// Serve the last persisted snapshot.
    Cached,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub use_local_data_source: bool,
    pub overview_url: String,
    pub schema_base_url: String,
    pub schema_version: String,
    pub snapshot_path: PathBuf,
    pub batch_size: usize,
    pub request_timeout_secs: u64,
}

impl Settings {
    /// Defaults, then `catalog.toml` if present, then `CATALOG_*` environment variables.
    pub fn load() -> Result<Settings, ConfigError> {
        Self::layered(File::with_name("catalog").required(false))
    }

    fn layered<F>(file: F) -> Result<Settings, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        Self::builder()?
            .add_source(file)
            .add_source(Environment::with_prefix("CATALOG").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<::config::ConfigBuilder<::config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("use_local_data_source", false)?
            .set_default("overview_url", OVERVIEW_URL)?
            .set_default("schema_base_url", SCHEMA_BASE_URL)?
            .set_default("schema_version", SCHEMA_VERSION)?
            .set_default("snapshot_path", SNAPSHOT_PATH)?
            .set_default("batch_size", BATCH_SIZE as u64)?
            .set_default("request_timeout_secs", REQUEST_TIMEOUT_SECS)
    }

    pub fn source_mode(&self) -> SourceMode {
        if self.use_local_data_source {
            SourceMode::Cached
        } else {
            SourceMode::Live
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            use_local_data_source: false,
            overview_url: OVERVIEW_URL.to_string(),
            schema_base_url: SCHEMA_BASE_URL.to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            snapshot_path: PathBuf::from(SNAPSHOT_PATH),
            batch_size: BATCH_SIZE,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}
