//! Queue of move uses for the current round.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::action::ResolveContext;
use crate::moves::{Move, MoveSet, MoveUse};
use crate::state::CharacterId;

/// Holds the round's queued move uses and resolves them one at a time.
#[derive(Clone, Debug, Default)]
pub struct MoveProcessor {
    queue: Vec<MoveUse>,
}

impl MoveProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `move_use` if `mv` still has uses left.
    pub fn push(&mut self, move_use: MoveUse, mv: &Move) -> bool {
        if !mv.is_usable() {
            return false;
        }
        self.queue.push(move_use);
        true
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Resolves the next use: highest priority first, then highest current
    /// speed, then queue order.
    ///
    /// Ordering is recomputed on every call so speed changes made earlier in
    /// the round take effect. A use whose user is dead comes back unresolved.
    pub fn apply_next(
        &mut self,
        move_sets: &mut BTreeMap<CharacterId, MoveSet>,
        ctx: &mut ResolveContext<'_>,
    ) -> Option<MoveUse> {
        if self.queue.is_empty() {
            return None;
        }

        let roster = &*ctx.roster;
        self.queue.sort_by_key(|u| {
            let speed = roster.get(u.user).map_or(i32::MIN, |c| c.speed());
            (Reverse(u.priority), Reverse(speed))
        });
        let mut move_use = self.queue.remove(0);

        if !ctx.roster.is_alive(move_use.user) {
            debug!("{} is down; skipping {}", move_use.user, move_use.move_name);
            return Some(move_use);
        }

        let Some(mv) = move_sets
            .get_mut(&move_use.user)
            .and_then(|set| set.get_mut(move_use.slot).ok())
        else {
            warn!(
                "{} queued {} from slot {} but it no longer exists",
                move_use.user, move_use.move_name, move_use.slot
            );
            return Some(move_use);
        };

        move_use.resolve(mv, ctx);
        Some(move_use)
    }
}
