//! Event table loader.

use std::path::Path;

use game_core::EventDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};

/// Event table structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCatalog {
    pub events: Vec<EventDefinition>,
}

/// Loader for narrative event tables from RON files.
pub struct EventLoader;

impl EventLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<EventDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EventDefinition>> {
        let catalog: EventCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse event table RON: {}", e))?;
        ensure_unique("event", catalog.events.iter().map(|event| &event.id))?;

        for event in &catalog.events {
            if event.options.is_empty() {
                anyhow::bail!("Event '{}' has no options", event.id);
            }
            ensure_unique(
                "event option",
                event.options.iter().map(|option| &option.key),
            )?;
        }
        Ok(catalog.events)
    }
}
