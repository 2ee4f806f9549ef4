//! Content loaders for reading run data from files.
//!
//! RON files hold catalogs (`relics.ron`, `deities.ron`, `cards.ron`,
//! `events.ron`); `config.toml` holds [`game_core::GameConfig`] overrides.

pub mod cards;
pub mod config;
pub mod deities;
pub mod events;
pub mod factory;
pub mod relics;

pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use deities::DeityLoader;
pub use events::EventLoader;
pub use factory::ContentFactory;
pub use relics::RelicLoader;

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects catalogs that define the same id twice.
pub(crate) fn ensure_unique<'a, T, I>(kind: &str, ids: I) -> LoadResult<()>
where
    T: Eq + Hash + Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            anyhow::bail!("Duplicate {} id '{}'", kind, id);
        }
    }
    Ok(())
}
