//! Deity catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};
use crate::specs::DeitySpec;

/// Deity catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeityCatalog {
    pub deities: Vec<DeitySpec>,
}

/// Loader for deity catalogs from RON files.
pub struct DeityLoader;

impl DeityLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<DeitySpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a catalog; a run needs at least three deities to offer.
    pub fn parse(content: &str) -> LoadResult<Vec<DeitySpec>> {
        let catalog: DeityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse deity catalog RON: {}", e))?;
        ensure_unique("deity", catalog.deities.iter().map(|deity| &deity.id))?;

        let required = game_core::GameConfig::OFFERED_DEITIES;
        if catalog.deities.len() < required {
            anyhow::bail!(
                "Deity catalog needs at least {} deities, found {}",
                required,
                catalog.deities.len()
            );
        }
        Ok(catalog.deities)
    }
}
