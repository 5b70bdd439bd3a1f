//! Roster catalog loader.
//!
//! One RON file describes the moves, items and characters of a battle.
//! Characters reference moves by id and items by name; every character gets
//! its own copy of each move so use counters are never shared.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use battle_core::{
    BattleConfig, Character, CharacterConfig, CharacterId, Item, Move, MoveConfig, MoveId, MoveSet,
    Roster, TeamId,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One character entry in a roster file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub id: CharacterId,
    pub name: String,
    pub team: TeamId,
    pub max_health: i32,
    pub attack: i32,
    pub defence: i32,
    pub speed: i32,
    /// Falls back to the battle config's default protect limit.
    #[serde(default)]
    pub protect_limit: Option<i32>,
    pub moves: Vec<MoveId>,
    /// Name of an entry in the item list.
    #[serde(default)]
    pub item: Option<String>,
}

/// Roster file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCatalog {
    pub moves: Vec<MoveConfig>,
    #[serde(default)]
    pub items: Vec<Item>,
    pub characters: Vec<CharacterEntry>,
}

/// Battle-ready roster and move sets.
#[derive(Debug, Clone)]
pub struct LoadedRoster {
    pub roster: Roster,
    pub move_sets: BTreeMap<CharacterId, MoveSet>,
}

/// Loader for roster catalogs from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster catalog and build characters and move sets from it.
    pub fn load(path: &Path, config: &BattleConfig) -> LoadResult<LoadedRoster> {
        let content = read_file(path)?;
        Self::parse(&content, config)
    }

    pub fn parse(content: &str, config: &BattleConfig) -> LoadResult<LoadedRoster> {
        let catalog: RosterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;
        Self::build(catalog, config)
    }

    pub fn build(catalog: RosterCatalog, config: &BattleConfig) -> LoadResult<LoadedRoster> {
        let mut moves: HashMap<MoveId, MoveConfig> = HashMap::new();
        for mv in catalog.moves {
            // validate once up front so errors name the move, not a character
            Move::new(mv.clone()).map_err(|e| anyhow::anyhow!("Invalid move: {}", e))?;
            if let Some(previous) = moves.insert(mv.id, mv) {
                anyhow::bail!("Duplicate move id {} ({})", previous.id, previous.name);
            }
        }

        let items: HashMap<String, Arc<Item>> = catalog
            .items
            .into_iter()
            .map(|item| (item.name.clone(), Arc::new(item)))
            .collect();

        let mut characters = Vec::with_capacity(catalog.characters.len());
        let mut move_sets = BTreeMap::new();
        for entry in catalog.characters {
            let set = entry
                .moves
                .iter()
                .map(|id| {
                    let mv = moves.get(id).ok_or_else(|| {
                        anyhow::anyhow!("Character '{}' references unknown move {}", entry.name, id)
                    })?;
                    Move::new(mv.clone()).map_err(|e| anyhow::anyhow!("Invalid move: {}", e))
                })
                .collect::<LoadResult<Vec<_>>>()?;

            let mut character = Character::new(
                CharacterConfig::new(entry.id, entry.name.clone(), entry.team, entry.max_health)
                    .with_stats(entry.attack, entry.defence, entry.speed)
                    .with_protect_limit(entry.protect_limit.unwrap_or(config.default_protect_limit)),
            )
            .map_err(|e| anyhow::anyhow!("Invalid character '{}': {}", entry.name, e))?;

            if let Some(name) = &entry.item {
                let item = items.get(name).ok_or_else(|| {
                    anyhow::anyhow!("Character '{}' holds unknown item '{}'", entry.name, name)
                })?;
                character.equip(Arc::clone(item));
            }

            tracing::debug!(
                "loaded {} ({}) on {} with {} moves",
                character.name(),
                character.id(),
                character.team(),
                set.len()
            );
            move_sets.insert(entry.id, MoveSet::new(set));
            characters.push(character);
        }

        let roster = Roster::new(characters).map_err(|e| anyhow::anyhow!("Invalid roster: {}", e))?;
        Ok(LoadedRoster { roster, move_sets })
    }
}
