use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP error! status: {status} ({url})")]
    Fetch { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot io error at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot at {} is not a resource list: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Failures that only cost one resource its details during enrichment.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Fetch { .. } | CatalogError::Transport { .. } | CatalogError::Parse { .. }
        )
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Fetch { status, .. } => Some(*status),
            CatalogError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
