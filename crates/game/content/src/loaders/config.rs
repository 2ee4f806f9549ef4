//! Run configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML files.
///
/// Every field is optional in the file; missing ones keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Loads `path` if it exists, otherwise returns the default config.
    pub fn load_or_default(path: &Path) -> LoadResult<GameConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(GameConfig::default())
        }
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.patron_threshold > config.max_faith_points {
            anyhow::bail!(
                "patron_threshold ({}) exceeds max_faith_points ({})",
                config.patron_threshold,
                config.max_faith_points
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("upgrade_price = 60\n").unwrap();
        assert_eq!(config.upgrade_price, 60);
        assert_eq!(config.max_faith_points, GameConfig::DEFAULT_MAX_FAITH_POINTS);
    }

    #[test]
    fn unreachable_patron_threshold_is_rejected() {
        assert!(ConfigLoader::parse("max_faith_points = 2\npatron_threshold = 3\n").is_err());
    }
}
