use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CatalogError, Result};
use crate::model::Resource;

/// On-disk JSON snapshot of the last assembled catalog.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the snapshot with `resources`, pretty-printed.
    pub fn write(&self, resources: &[Resource]) -> Result<()> {
        let persistence = |source| CatalogError::Persistence {
            path: self.path.clone(),
            source,
        };

        let mut json = serde_json::to_string_pretty(resources).map_err(|source| CatalogError::Snapshot {
            path: self.path.clone(),
            source,
        })?;
        json.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persistence)?;
        }
        fs::write(&self.path, json).map_err(persistence)?;

        info!("Resources saved to {}", self.path.display());
        Ok(())
    }

    pub fn read(&self) -> Result<Vec<Resource>> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Persistence {
            path: self.path.clone(),
            source,
        })?;
        let resources: Vec<Resource> = serde_json::from_str(&raw).map_err(|source| CatalogError::Snapshot {
            path: self.path.clone(),
            source,
        })?;
        info!("Loaded {} resources from {}", resources.len(), self.path.display());
        Ok(resources)
    }
}
