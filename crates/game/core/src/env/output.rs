//! Display sink notified after each resolved phase.

use crate::action::ActionResult;
use crate::engine::{BattleOutcome, BattlePhase};
use crate::moves::MoveUse;
use crate::state::Roster;

/// Receives battle progress for display. Purely a sink: nothing it does
/// feeds back into resolution.
pub trait BattleOutput {
    fn round_started(&mut self, _turn: u32, _roster: &Roster) {}

    fn move_resolved(&mut self, _move_use: &MoveUse, _roster: &Roster) {}

    fn phase_resolved(&mut self, _phase: BattlePhase, _results: &[ActionResult], _roster: &Roster) {
    }

    fn battle_ended(&mut self, _outcome: &BattleOutcome, _roster: &Roster) {}
}

/// Output that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOutput;

impl BattleOutput for NullOutput {}
