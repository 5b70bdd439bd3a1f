//! Resolution context shared by target calculators, actions and moves.

use crate::config::BattleConfig;
use crate::env::{RandomSource, TargetInput};
use crate::history::ActionHistory;
use crate::state::Roster;

/// Everything an action needs while it resolves.
///
/// The battle builds one of these around its own fields for each step, so
/// the roster is the only thing mutated during resolution; history is read
/// here and appended to by the battle afterwards.
pub struct ResolveContext<'a> {
    /// Live characters.
    pub roster: &'a mut Roster,

    /// Everything resolved before the current move.
    pub history: &'a ActionHistory,

    pub rng: &'a mut dyn RandomSource,

    /// Answers `TargetCalculator::Chosen`.
    pub input: &'a mut dyn TargetInput,

    pub config: &'a BattleConfig,
}

impl<'a> ResolveContext<'a> {
    pub fn new(
        roster: &'a mut Roster,
        history: &'a ActionHistory,
        rng: &'a mut dyn RandomSource,
        input: &'a mut dyn TargetInput,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            roster,
            history,
            rng,
            input,
            config,
        }
    }
}
