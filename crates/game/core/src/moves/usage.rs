//! A queued move use and its per-action target state.

use crate::action::{ResolveContext, TargetSlot};
use crate::state::{CharacterId, MoveId};

use super::{Move, MoveOutcome, MoveUseResult};

/// One character's move for one round.
///
/// Created by [`MoveUse::prepare`] during move selection; resolved by the
/// processor. Unresolved uses (the user died before acting) keep `result`
/// empty and are not recorded in history.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveUse {
    pub user: CharacterId,
    /// Index into the user's move set.
    pub slot: usize,
    pub move_id: MoveId,
    pub move_name: String,
    pub priority: i32,
    /// Characters other than the user at selection time.
    pub others: Vec<CharacterId>,
    /// One slot per action of the move.
    pub targets: Vec<TargetSlot>,
    pub result: Option<MoveUseResult>,
}

impl MoveUse {
    /// Snapshot the move and establish its non-reactive targets.
    pub fn prepare(
        user: CharacterId,
        slot: usize,
        mv: &Move,
        others: Vec<CharacterId>,
        ctx: &mut ResolveContext<'_>,
    ) -> Self {
        let targets = mv.set_targets(user, &others, ctx);
        Self {
            user,
            slot,
            move_id: mv.id(),
            move_name: mv.name().to_owned(),
            priority: mv.priority(),
            others,
            targets,
            result: None,
        }
    }

    /// Use `mv` with this use's target state.
    pub fn resolve(&mut self, mv: &mut Move, ctx: &mut ResolveContext<'_>) -> &MoveUseResult {
        let result = mv.use_move(&mut self.targets, self.user, &self.others, ctx);
        self.result.insert(result)
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    pub fn outcome(&self) -> Option<MoveOutcome> {
        self.result.as_ref().map(|r| r.outcome)
    }
}
