//! Battle participant types.

pub mod character;
pub mod common;
pub mod item;
pub mod roster;

pub use character::{Character, CharacterConfig, CharacterError};
pub use common::{CharacterId, MoveId, TeamId};
pub use item::{Item, ItemSlot};
pub use roster::Roster;
