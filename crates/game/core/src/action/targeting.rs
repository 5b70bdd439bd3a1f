//! Targeting system for actions.
//!
//! A [`TargetCalculator`] maps `(user, others)` to an ordered target list.
//! `others` is the candidate set offered by the enclosing move; it shrinks
//! between the actions of a move as protected targets drop out.
//!
//! Most calculators are evaluated once, when the move is queued. Reactive
//! calculators depend on what happens during the round (who hit the user),
//! so they are evaluated at the moment the action executes.

use crate::state::{Character, CharacterId, Roster, TeamId};

use super::context::ResolveContext;

// ============================================================================
// Target Outcome
// ============================================================================

/// Result of a target calculation. `success == false` always carries no targets.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetOutcome {
    pub success: bool,
    pub targets: Vec<CharacterId>,
}

impl TargetOutcome {
    pub fn failure() -> Self {
        Self::default()
    }

    /// Succeeds iff `targets` is non-empty.
    pub fn from_targets(targets: Vec<CharacterId>) -> Self {
        Self {
            success: !targets.is_empty(),
            targets,
        }
    }

    pub fn single(target: CharacterId) -> Self {
        Self {
            success: true,
            targets: vec![target],
        }
    }

    /// Keeps targets that are the user or still among `others`.
    pub fn narrowed(self, user: CharacterId, others: &[CharacterId]) -> Self {
        if !self.success {
            return self;
        }
        let targets = self
            .targets
            .into_iter()
            .filter(|id| *id == user || others.contains(id))
            .collect();
        Self::from_targets(targets)
    }
}

// ============================================================================
// Target Slot
// ============================================================================

/// Per-use target state of one action.
///
/// ```text
/// Unset ──set_targets──▶ Set(outcome) ──apply──▶ Consumed
///   │                                              ▲
///   └──set_targets (reactive)──▶ Deferred ──apply──┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSlot {
    #[default]
    Unset,
    /// Reactive calculator; resolved when the action executes.
    Deferred,
    Set(TargetOutcome),
    Consumed,
}

// ============================================================================
// Target Calculator
// ============================================================================

/// How an action selects targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetCalculator {
    /// The user followed by every other character.
    All,
    /// Every other character.
    Others,
    /// The user and every other character on the user's team.
    Team,
    /// Other characters on the user's team.
    Allies,
    /// Characters on any other team.
    Enemies,
    /// The user alone.
    User,
    FirstAlly,
    RandomAlly,
    FirstEnemy,
    RandomEnemy,
    FirstOther,
    RandomOther,
    /// Whoever last dealt move damage to the user this turn.
    ///
    /// Reactive. Fails when nobody did, or when the user hit itself.
    Retaliation,
    /// Asks the injected [`TargetInput`](crate::TargetInput) to pick one living other.
    Chosen,
}

impl TargetCalculator {
    /// True when the result must be computed at use time.
    pub fn is_reactive(&self) -> bool {
        matches!(self, TargetCalculator::Retaliation)
    }

    /// Compute targets for `user` among `others`.
    pub fn calculate(
        &self,
        user: CharacterId,
        others: &[CharacterId],
        ctx: &mut ResolveContext<'_>,
    ) -> TargetOutcome {
        let roster: &Roster = &*ctx.roster;
        let Some(team) = roster.team_of(user) else {
            return TargetOutcome::failure();
        };

        match self {
            TargetCalculator::All => TargetOutcome::from_targets(
                std::iter::once(user).chain(others.iter().copied()).collect(),
            ),
            TargetCalculator::Others => TargetOutcome::from_targets(others.to_vec()),
            TargetCalculator::Team => TargetOutcome::from_targets(
                std::iter::once(user)
                    .chain(allies(roster, others, team))
                    .collect(),
            ),
            TargetCalculator::Allies => {
                TargetOutcome::from_targets(allies(roster, others, team).collect())
            }
            TargetCalculator::Enemies => {
                TargetOutcome::from_targets(enemies(roster, others, team).collect())
            }
            TargetCalculator::User => TargetOutcome::single(user),
            TargetCalculator::FirstAlly => first(living(roster, allies(roster, others, team))),
            TargetCalculator::FirstEnemy => first(living(roster, enemies(roster, others, team))),
            TargetCalculator::FirstOther => first(living(roster, others.iter().copied())),
            TargetCalculator::RandomAlly => {
                let pool = living(roster, allies(roster, others, team));
                random(pool, ctx)
            }
            TargetCalculator::RandomEnemy => {
                let pool = living(roster, enemies(roster, others, team));
                random(pool, ctx)
            }
            TargetCalculator::RandomOther => {
                let pool = living(roster, others.iter().copied());
                random(pool, ctx)
            }
            TargetCalculator::Retaliation => retaliation(user, ctx),
            TargetCalculator::Chosen => chosen(user, others, ctx),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn allies<'r>(
    roster: &'r Roster,
    others: &'r [CharacterId],
    team: TeamId,
) -> impl Iterator<Item = CharacterId> + 'r {
    others
        .iter()
        .copied()
        .filter(move |&id| roster.team_of(id) == Some(team))
}

fn enemies<'r>(
    roster: &'r Roster,
    others: &'r [CharacterId],
    team: TeamId,
) -> impl Iterator<Item = CharacterId> + 'r {
    others
        .iter()
        .copied()
        .filter(move |&id| roster.team_of(id).is_some_and(|t| t != team))
}

fn living(roster: &Roster, ids: impl Iterator<Item = CharacterId>) -> Vec<CharacterId> {
    ids.filter(|&id| roster.is_alive(id)).collect()
}

fn first(pool: Vec<CharacterId>) -> TargetOutcome {
    pool.first()
        .map_or_else(TargetOutcome::failure, |&id| TargetOutcome::single(id))
}

fn random(pool: Vec<CharacterId>, ctx: &mut ResolveContext<'_>) -> TargetOutcome {
    if pool.is_empty() {
        return TargetOutcome::failure();
    }
    let pick = ctx.rng.next(pool.len() as u32) as usize;
    pool.get(pick)
        .map_or_else(TargetOutcome::failure, |&id| TargetOutcome::single(id))
}

fn retaliation(user: CharacterId, ctx: &ResolveContext<'_>) -> TargetOutcome {
    match ctx.history.last_damage_against(user) {
        Some(hit) if hit.user != user && ctx.roster.get(hit.user).is_some() => {
            TargetOutcome::single(hit.user)
        }
        _ => TargetOutcome::failure(),
    }
}

fn chosen(user: CharacterId, others: &[CharacterId], ctx: &mut ResolveContext<'_>) -> TargetOutcome {
    let roster: &Roster = &*ctx.roster;
    let Some(user_character) = roster.get(user) else {
        return TargetOutcome::failure();
    };
    let candidates: Vec<&Character> = others
        .iter()
        .filter_map(|&id| roster.get(id))
        .filter(|c| c.is_alive())
        .collect();
    if candidates.is_empty() {
        return TargetOutcome::failure();
    }

    match ctx.input.choose_target(user_character, &candidates) {
        Some(pick) if candidates.iter().any(|c| c.id() == pick) => TargetOutcome::single(pick),
        _ => TargetOutcome::failure(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{FirstCandidate, NoInput, ScriptedRng};
    use crate::history::ActionHistory;
    use crate::state::{Character, CharacterConfig};

    fn roster() -> Roster {
        let make = |id: u32, team: u32| {
            Character::new(CharacterConfig::new(
                CharacterId(id),
                format!("c{id}"),
                TeamId(team),
                30,
            ))
            .unwrap()
        };
        // 1 and 2 on team 0; 3 and 4 on team 1
        Roster::new(vec![make(1, 0), make(2, 0), make(3, 1), make(4, 1)]).unwrap()
    }

    fn ids(raw: &[u32]) -> Vec<CharacterId> {
        raw.iter().copied().map(CharacterId).collect()
    }

    fn run(calculator: TargetCalculator, roster: &mut Roster, rng: &mut ScriptedRng) -> TargetOutcome {
        let history = ActionHistory::new();
        let config = BattleConfig::default();
        let mut input = NoInput;
        let others = roster.others(CharacterId(1));
        let mut ctx = ResolveContext::new(roster, &history, rng, &mut input, &config);
        calculator.calculate(CharacterId(1), &others, &mut ctx)
    }

    #[test]
    fn group_calculators() {
        let mut roster = roster();
        let mut rng = ScriptedRng::new([0]);

        assert_eq!(run(TargetCalculator::All, &mut roster, &mut rng).targets, ids(&[1, 2, 3, 4]));
        assert_eq!(run(TargetCalculator::Others, &mut roster, &mut rng).targets, ids(&[2, 3, 4]));
        assert_eq!(run(TargetCalculator::Team, &mut roster, &mut rng).targets, ids(&[1, 2]));
        assert_eq!(run(TargetCalculator::Allies, &mut roster, &mut rng).targets, ids(&[2]));
        assert_eq!(run(TargetCalculator::Enemies, &mut roster, &mut rng).targets, ids(&[3, 4]));
        assert_eq!(run(TargetCalculator::User, &mut roster, &mut rng).targets, ids(&[1]));
    }

    #[test]
    fn single_pick_calculators_skip_the_dead() {
        let mut roster = roster();
        roster.get_mut(CharacterId(3)).unwrap().take_damage(100);
        let mut rng = ScriptedRng::new([1]);

        assert_eq!(run(TargetCalculator::FirstEnemy, &mut roster, &mut rng).targets, ids(&[4]));
        assert_eq!(run(TargetCalculator::FirstOther, &mut roster, &mut rng).targets, ids(&[2]));
        // living others are [2, 4]; scripted pick 1 → 4
        assert_eq!(run(TargetCalculator::RandomOther, &mut roster, &mut rng).targets, ids(&[4]));
    }

    #[test]
    fn empty_pools_fail_with_no_targets() {
        let mut roster = roster();
        roster.get_mut(CharacterId(2)).unwrap().take_damage(100);
        let mut rng = ScriptedRng::new([0]);

        let outcome = run(TargetCalculator::RandomAlly, &mut roster, &mut rng);
        assert!(!outcome.success);
        assert!(outcome.targets.is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn retaliation_without_history_fails() {
        let mut roster = roster();
        let mut rng = ScriptedRng::new([0]);
        let outcome = run(TargetCalculator::Retaliation, &mut roster, &mut rng);
        assert_eq!(outcome, TargetOutcome::failure());
        assert!(TargetCalculator::Retaliation.is_reactive());
        assert!(!TargetCalculator::Enemies.is_reactive());
    }

    #[test]
    fn chosen_defers_to_input() {
        let mut roster = roster();
        let history = ActionHistory::new();
        let config = BattleConfig::default();
        let mut rng = ScriptedRng::new([0]);
        let mut input = FirstCandidate;
        let others = ids(&[3, 4]);
        let mut ctx = ResolveContext::new(&mut roster, &history, &mut rng, &mut input, &config);

        let outcome = TargetCalculator::Chosen.calculate(CharacterId(1), &others, &mut ctx);
        assert_eq!(outcome.targets, ids(&[3]));
    }

    #[test]
    fn narrowing_keeps_user_and_remaining_candidates() {
        let outcome = TargetOutcome::from_targets(ids(&[1, 2, 3]));
        let narrowed = outcome.narrowed(CharacterId(1), &ids(&[3]));
        assert_eq!(narrowed.targets, ids(&[1, 3]));

        let emptied = TargetOutcome::from_targets(ids(&[2])).narrowed(CharacterId(1), &[]);
        assert!(!emptied.success);
    }
}
