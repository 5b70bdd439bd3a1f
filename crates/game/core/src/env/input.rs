//! Decision sources: which move a character uses and whom it picks.
//!
//! Both are pure queries. They never touch battle state; the battle
//! validates whatever they answer.

use crate::moves::MoveSet;
use crate::state::{Character, CharacterId};

use super::rng::RandomSource;

/// Resolves the target of a [`TargetCalculator::Chosen`](crate::TargetCalculator::Chosen) action.
pub trait TargetInput {
    /// Pick one of `candidates`, or `None` to decline (the action then has no target).
    fn choose_target(&mut self, user: &Character, candidates: &[&Character]) -> Option<CharacterId>;
}

/// Input source that never picks anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoInput;

impl TargetInput for NoInput {
    fn choose_target(&mut self, _user: &Character, _candidates: &[&Character]) -> Option<CharacterId> {
        None
    }
}

/// Always picks the first candidate offered.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstCandidate;

impl TargetInput for FirstCandidate {
    fn choose_target(&mut self, _user: &Character, candidates: &[&Character]) -> Option<CharacterId> {
        candidates.first().map(|c| c.id())
    }
}

/// Selects the move a character queues for the round.
pub trait MoveChooser {
    /// Index into `moves`, or `None` to pass. Out-of-range indices are
    /// rejected by the battle with [`MoveSetError`](crate::MoveSetError).
    fn choose_move(
        &mut self,
        user: &Character,
        moves: &MoveSet,
        rng: &mut dyn RandomSource,
    ) -> Option<usize>;
}

/// Uniform choice among the moves that still have uses left.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMoveChooser;

impl MoveChooser for RandomMoveChooser {
    fn choose_move(
        &mut self,
        _user: &Character,
        moves: &MoveSet,
        rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        let usable = moves.usable_indices();
        if usable.is_empty() {
            return None;
        }
        let pick = rng.next(usable.len() as u32) as usize;
        usable.get(pick).copied()
    }
}
