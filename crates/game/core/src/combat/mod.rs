//! Per-target magnitude calculators.
//!
//! Calculators are pure functions of the user, the target, the history and
//! the injected random source. They never mutate characters; the owning
//! action applies whatever they return.
//!
//! - [`DamageCalculator`]: health loss, always at least 1
//! - [`HealCalculator`]: health gain, clamped by the character
//! - [`BuffCalculator`]: stat multiplier delta
//! - [`SuccessCalculator`]: success / miss / failure roll for moves and flinches

pub mod buff;
pub mod damage;
pub mod heal;
pub mod hit;

pub use buff::BuffCalculator;
pub use damage::{DamageCalculator, base_power_damage};
pub use heal::HealCalculator;
pub use hit::SuccessCalculator;

use crate::action::ActionKey;
use crate::config::BattleConfig;
use crate::history::ActionHistory;
use crate::state::Character;

/// Read-only inputs shared by every calculator.
#[derive(Clone, Copy)]
pub struct CalcInput<'c> {
    pub user: &'c Character,
    pub target: &'c Character,

    /// Number of live targets the action is hitting.
    pub target_count: usize,

    /// Identity of the action being applied; `None` for item actions.
    pub key: Option<ActionKey>,

    pub history: &'c ActionHistory,
    pub config: &'c BattleConfig,
}

impl CalcInput<'_> {
    /// The user's current streak for this action, 0 without a key.
    pub fn action_streak(&self) -> u32 {
        self.key.map_or(0, |key| {
            self.history
                .consecutive_action_successes(key, self.user.id())
        })
    }
}
