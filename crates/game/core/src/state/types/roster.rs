use std::collections::BTreeSet;

use crate::error::ConfigError;

use super::character::Character;
use super::common::{CharacterId, TeamId};

/// Every character taking part in a battle, in declaration order.
///
/// Declaration order is the tie-break of last resort wherever the engine
/// sorts characters, which keeps ordering reproducible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new(characters: Vec<Character>) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for character in &characters {
            if !seen.insert(character.id()) {
                return Err(ConfigError::DuplicateCharacter { id: character.id() });
            }
        }
        Ok(Self { characters })
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn ids(&self) -> Vec<CharacterId> {
        self.characters.iter().map(Character::id).collect()
    }

    pub fn is_alive(&self, id: CharacterId) -> bool {
        self.get(id).is_some_and(Character::is_alive)
    }

    /// Everyone except `id`, dead or alive, in declaration order.
    pub fn others(&self, id: CharacterId) -> Vec<CharacterId> {
        self.characters
            .iter()
            .map(Character::id)
            .filter(|&other| other != id)
            .collect()
    }

    /// Living characters by descending current speed (stable on ties).
    pub fn living_by_speed(&self) -> Vec<CharacterId> {
        let mut living: Vec<&Character> = self.characters.iter().filter(|c| c.is_alive()).collect();
        living.sort_by_key(|c| std::cmp::Reverse(c.speed()));
        living.into_iter().map(Character::id).collect()
    }

    pub fn team_of(&self, id: CharacterId) -> Option<TeamId> {
        self.get(id).map(Character::team)
    }

    pub fn teams(&self) -> BTreeSet<TeamId> {
        self.characters.iter().map(Character::team).collect()
    }

    /// Teams with at least one living member.
    pub fn teams_alive(&self) -> BTreeSet<TeamId> {
        self.characters
            .iter()
            .filter(|c| c.is_alive())
            .map(Character::team)
            .collect()
    }
}
