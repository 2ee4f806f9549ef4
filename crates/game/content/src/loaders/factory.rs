//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use game_core::{EventDefinition, GameConfig};

use crate::loaders::cards::CardCatalog;
use crate::loaders::{CardLoader, ConfigLoader, DeityLoader, EventLoader, LoadResult, RelicLoader};
use crate::specs::{DeitySpec, RelicSpec};

/// Content factory that loads all run content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── relics.ron
/// ├── deities.ron
/// ├── cards.ron
/// └── events.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load run configuration from `config.toml`, falling back to defaults
    /// when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load_or_default(&self.data_dir.join("config.toml"))
    }

    /// Load relic catalog from `relics.ron`.
    pub fn load_relics(&self) -> LoadResult<Vec<RelicSpec>> {
        RelicLoader::load(&self.data_dir.join("relics.ron"))
    }

    /// Load deity catalog from `deities.ron`.
    pub fn load_deities(&self) -> LoadResult<Vec<DeitySpec>> {
        DeityLoader::load(&self.data_dir.join("deities.ron"))
    }

    /// Load card table and starting deck from `cards.ron`.
    pub fn load_cards(&self) -> LoadResult<CardCatalog> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    /// Load narrative events from `events.ron`.
    pub fn load_events(&self) -> LoadResult<Vec<EventDefinition>> {
        EventLoader::load(&self.data_dir.join("events.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
