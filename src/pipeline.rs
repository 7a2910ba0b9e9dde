use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use crate::batch::{self, EnrichStats};
use crate::config::{Settings, SourceMode};
use crate::error::Result;
use crate::fetcher::{self, DetailSource, SchemaClient};
use crate::model::Resource;
use crate::normalize::normalize;
use crate::scraper;
use crate::store::SnapshotStore;

/// One catalog load, either assembled live or served from the snapshot.
pub struct Pipeline<S> {
    mode: SourceMode,
    client: Client,
    overview_url: String,
    source: Arc<S>,
    store: SnapshotStore,
    batch_size: usize,
}

impl Pipeline<SchemaClient> {
    pub fn from_settings(settings: &Settings, mode: SourceMode) -> Result<Self> {
        let client = fetcher::build_client(settings.request_timeout())?;
        let source = SchemaClient::new(client.clone(), &settings.schema_base_url, &settings.schema_version);
        Ok(Pipeline::new(
            mode,
            client,
            &settings.overview_url,
            Arc::new(source),
            SnapshotStore::new(&settings.snapshot_path),
        )
        .with_batch_size(settings.batch_size))
    }
}

impl<S> Pipeline<S>
where
    S: DetailSource + 'static,
{
    pub fn new(
        mode: SourceMode,
        client: Client,
        overview_url: impl Into<String>,
        source: Arc<S>,
        store: SnapshotStore,
    ) -> Self {
        Pipeline {
            mode,
            client,
            overview_url: overview_url.into(),
            source,
            store,
            batch_size: crate::config::BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub async fn load(&self) -> Result<Vec<Resource>> {
        match self.mode {
            SourceMode::Live => self.load_live().await.map(|(resources, _)| resources),
            SourceMode::Cached => self.load_cached(),
        }
    }

    /// Scrape → enrich → normalize → persist. A failed page fetch aborts the run.
    pub async fn load_live(&self) -> Result<(Vec<Resource>, EnrichStats)> {
        info!("Fetching fields overview: {}", self.overview_url);
        let html = fetcher::fetch_text(&self.client, &self.overview_url).await?;
        info!("HTML length: {}", html.len());

        let scraped = scraper::scrape_resources(&html);
        let (enriched, stats) = batch::enrich_all(Arc::clone(&self.source), scraped, self.batch_size).await;
        let resources = normalize(enriched);

        self.store.write(&resources)?;
        Ok((resources, stats))
    }

    pub fn load_cached(&self) -> Result<Vec<Resource>> {
        info!("Using local snapshot {}", self.store.path().display());
        let resources = self.store.read()?;
        Ok(normalize(resources))
    }
}
