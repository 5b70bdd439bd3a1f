//! Record of everything resolved so far in a battle.
//!
//! Feeds the reactive parts of resolution: retaliation targets, counter
//! damage, and the streaks behind escalating and decaying calculators.

use crate::action::{ActionKey, ActionResult, EffectKind};
use crate::moves::MoveUse;
use crate::state::{CharacterId, MoveId};

#[derive(Clone, Debug)]
struct TurnMoveUse {
    turn: u32,
    move_use: MoveUse,
}

#[derive(Clone, Debug)]
struct TurnItemResult {
    turn: u32,
    result: ActionResult,
}

/// Append-only battle log plus the turn counter.
#[derive(Clone, Debug, Default)]
pub struct ActionHistory {
    turn: u32,
    move_uses: Vec<TurnMoveUse>,
    item_results: Vec<TurnItemResult>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current turn. 0 before the first round starts.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Starts the next turn and returns its number.
    pub fn advance_turn(&mut self) -> u32 {
        self.turn += 1;
        self.turn
    }

    /// Records a resolved move use. Unresolved uses are ignored.
    pub fn record_move_use(&mut self, move_use: MoveUse) {
        if !move_use.is_resolved() {
            return;
        }
        self.move_uses.push(TurnMoveUse {
            turn: self.turn,
            move_use,
        });
    }

    /// Records item-caused results; move-caused ones arrive with their use.
    pub fn record_action_results(&mut self, results: impl IntoIterator<Item = ActionResult>) {
        let turn = self.turn;
        self.item_results.extend(
            results
                .into_iter()
                .filter(|r| r.source.is_item())
                .map(|result| TurnItemResult { turn, result }),
        );
    }

    pub fn move_uses(&self) -> impl DoubleEndedIterator<Item = &MoveUse> {
        self.move_uses.iter().map(|u| &u.move_use)
    }

    pub fn move_uses_in_turn(&self, turn: u32) -> impl Iterator<Item = &MoveUse> {
        self.move_uses
            .iter()
            .filter(move |u| u.turn == turn)
            .map(|u| &u.move_use)
    }

    pub fn item_results_in_turn(&self, turn: u32) -> impl Iterator<Item = &ActionResult> {
        self.item_results
            .iter()
            .filter(move |r| r.turn == turn)
            .map(|r| &r.result)
    }

    /// Most recent applied, move-caused damage against `id` this turn.
    pub fn last_damage_against(&self, id: CharacterId) -> Option<&ActionResult> {
        self.move_uses
            .iter()
            .rev()
            .take_while(|u| u.turn == self.turn)
            .filter_map(|u| u.move_use.result.as_ref())
            .flat_map(|result| result.actions.iter().rev())
            .flat_map(|action| action.results.iter().rev())
            .find(|r| {
                r.applied && r.target == id && r.kind == EffectKind::Damage && r.source.is_move()
            })
    }

    /// Consecutive successful uses of `move_id` by `user`, newest first.
    ///
    /// Only `user`'s uses of that move are considered; the streak ends at the
    /// first one that did not succeed.
    pub fn consecutive_move_successes(&self, move_id: MoveId, user: CharacterId) -> u32 {
        self.move_uses
            .iter()
            .rev()
            .map(|u| &u.move_use)
            .filter(|u| u.user == user && u.move_id == move_id)
            .take_while(|u| u.result.as_ref().is_some_and(|r| r.is_success()))
            .count() as u32
    }

    /// Consecutive landed applications of the action `key` by `user`.
    ///
    /// Every use of the owning move counts: a use where the action never ran
    /// (move missed, earlier action failed) breaks the streak.
    pub fn consecutive_action_successes(&self, key: ActionKey, user: CharacterId) -> u32 {
        self.move_uses
            .iter()
            .rev()
            .map(|u| &u.move_use)
            .filter(|u| u.user == user && u.move_id == key.move_id)
            .take_while(|u| {
                u.result
                    .as_ref()
                    .and_then(|r| r.actions.get(key.index))
                    .is_some_and(|a| a.landed())
            })
            .count() as u32
    }
}
