//! Characters and the roster that holds them.
//!
//! Characters own their health, stats, equipment slot and protect queue.
//! Actions and moves only ever refer to them by [`CharacterId`] and mutate
//! them through the roster handed in by the battle.
pub mod types;

pub use types::{
    Character, CharacterConfig, CharacterError, CharacterId, Item, ItemSlot, MoveId, Roster,
    TeamId,
};
