//! Relic catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_unique, read_file};
use crate::specs::RelicSpec;

/// Relic catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelicCatalog {
    pub relics: Vec<RelicSpec>,
}

/// Loader for relic catalogs from RON files.
pub struct RelicLoader;

impl RelicLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<RelicSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<RelicSpec>> {
        let catalog: RelicCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse relic catalog RON: {}", e))?;
        ensure_unique("relic", catalog.relics.iter().map(|relic| &relic.id))?;
        Ok(catalog.relics)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{
        DamageOp, DamagePhase, DamageRule, DamageTarget, HookEffect, ProgressCounter,
        RelicBehavior, UnlockCondition,
    };

    use super::*;

    #[test]
    fn parses_hooks_and_rules() {
        let relics = RelicLoader::parse(
            r#"(
                relics: [
                    (
                        id: "pilgrim_badge",
                        name: "Pilgrim's Badge",
                        unlock: Some(CounterReaches(counter: EventPicks, value: 3)),
                        on_activate: [GainMaxHp(5)],
                    ),
                    (
                        id: "whetstone",
                        name: "Whetstone",
                        damage: [(phase: PreStatus, target: Some(Enemy), op: Add(3))],
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(relics.len(), 2);
        assert_eq!(
            relics[0].unlock,
            Some(UnlockCondition::reaches(ProgressCounter::EventPicks, 3))
        );
        assert_eq!(relics[0].on_activate.effects(), vec![HookEffect::GainMaxHp(5)]);
        assert_eq!(
            relics[1].damage,
            vec![
                DamageRule::new(DamagePhase::PreStatus, DamageOp::Add(3))
                    .for_target(DamageTarget::Enemy)
            ]
        );
        assert!(relics[1].unlock().is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = RelicLoader::parse(
            r#"(relics: [(id: "a", name: "A"), (id: "a", name: "Again")])"#,
        );
        assert!(result.is_err());
    }
}
