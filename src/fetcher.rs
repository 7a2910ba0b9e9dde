use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::model::ResourceDetails;

/// Anything that can resolve a resource name to its field schema.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn fetch_details(&self, name: &str) -> Result<ResourceDetails>;
}

/// Schema service client: `{base}/schemas/{version}/{name}.json`.
#[derive(Debug, Clone)]
pub struct SchemaClient {
    client: Client,
    base_url: String,
    version: String,
}

impl SchemaClient {
    pub fn new(client: Client, base_url: impl Into<String>, version: impl Into<String>) -> Self {
        SchemaClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            version: version.into(),
        }
    }

    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/schemas/{}/{}.json", self.base_url, self.version, name)
    }
}

#[async_trait]
impl DetailSource for SchemaClient {
    async fn fetch_details(&self, name: &str) -> Result<ResourceDetails> {
        let url = self.endpoint(name);
        let body = fetch_text(&self.client, &url).await?;
        serde_json::from_str(&body).map_err(|source| CatalogError::Parse {
            what: format!("schema for {}", name),
            source,
        })
    }
}

pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|source| CatalogError::Transport {
        url: "http client".to_string(),
        source,
    })
}

/// GET `url` and return the body; any non-2xx status is a `Fetch` failure.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let transport = |source| CatalogError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    debug!("GET {} -> {}", url, status);
    if !status.is_success() {
        return Err(CatalogError::Fetch {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().await.map_err(transport)
}
