//! Moves: named, limited-use bundles of actions.
//!
//! A [`Move`] owns its action templates and its remaining-use counter. The
//! per-use target state lives in a [`MoveUse`], created when the move is
//! queued and resolved later by the battle's processor.

pub mod set;
pub mod usage;

pub use set::{MoveSet, MoveSetError};
pub use usage::MoveUse;

use tracing::debug;

use crate::action::{Action, ActionKey, ActionSource, ActionUseResult, ResolveContext, TargetSlot};
use crate::combat::SuccessCalculator;
use crate::error::ConfigError;
use crate::state::{CharacterId, MoveId};

// ============================================================================
// Outcome
// ============================================================================

/// How a move use went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    Success,
    /// Accuracy roll missed.
    Miss,
    /// The user's flinch flag was set when its turn came.
    Flinched,
    /// Success roll failed (e.g. decaying chance on repeated use).
    Failure,
}

/// Outcome plus the result of every action that ran, in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveUseResult {
    pub outcome: MoveOutcome,
    pub actions: Vec<ActionUseResult>,
}

impl MoveUseResult {
    pub fn is_success(&self) -> bool {
        self.outcome == MoveOutcome::Success
    }

    /// Every per-target result, in application order.
    pub fn results(&self) -> impl Iterator<Item = &crate::action::ActionResult> {
        self.actions.iter().flat_map(|a| a.results.iter())
    }
}

// ============================================================================
// Move
// ============================================================================

/// Static description used to build a [`Move`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveConfig {
    pub id: MoveId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub max_uses: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    pub actions: Vec<Action>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub success: SuccessCalculator,
}

impl MoveConfig {
    pub fn new(id: MoveId, name: impl Into<String>, max_uses: i32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            max_uses,
            priority: 0,
            actions: Vec::new(),
            success: SuccessCalculator::Always,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_success(mut self, success: SuccessCalculator) -> Self {
        self.success = success;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Move {
    id: MoveId,
    name: String,
    description: String,
    max_uses: i32,
    remaining_uses: i32,
    priority: i32,
    actions: Vec<Action>,
    success: SuccessCalculator,
}

impl Move {
    /// Builds a move with every use remaining.
    pub fn new(config: MoveConfig) -> Result<Self, ConfigError> {
        if config.name.trim().is_empty() {
            return Err(ConfigError::EmptyMoveName { id: config.id });
        }
        if config.actions.is_empty() {
            return Err(ConfigError::MoveWithoutActions {
                id: config.id,
                name: config.name,
            });
        }
        if config.max_uses <= 0 {
            return Err(ConfigError::NonPositiveUses {
                id: config.id,
                name: config.name,
                max_uses: config.max_uses,
            });
        }

        Ok(Self {
            id: config.id,
            name: config.name,
            description: config.description,
            max_uses: config.max_uses,
            remaining_uses: config.max_uses,
            priority: config.priority,
            actions: config.actions,
            success: config.success,
        })
    }

    pub fn id(&self) -> MoveId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn max_uses(&self) -> i32 {
        self.max_uses
    }

    pub fn remaining_uses(&self) -> i32 {
        self.remaining_uses
    }

    pub fn is_usable(&self) -> bool {
        self.remaining_uses > 0
    }

    /// Changes the use cap.
    ///
    /// With `ignore_remaining` the remaining count is left alone (except that
    /// it never exceeds the new cap); otherwise it is reset to `max`.
    pub fn set_max_uses(&mut self, max: i32, ignore_remaining: bool) {
        self.max_uses = max;
        if !ignore_remaining {
            self.remaining_uses = max;
        }
        self.remaining_uses = self.remaining_uses.min(max);
    }

    /// Establish targets for every action, in order.
    pub fn set_targets(
        &self,
        user: CharacterId,
        others: &[CharacterId],
        ctx: &mut ResolveContext<'_>,
    ) -> Vec<TargetSlot> {
        self.actions
            .iter()
            .map(|action| action.set_targets(user, others, ctx))
            .collect()
    }

    /// Use the move, consuming `slots` (one per action).
    ///
    /// Candidates start as `others`. After each action, a candidate stays in
    /// play if the action produced no result for it or at least one applied
    /// result; a protected candidate drops out. An unsuccessful action stops
    /// the move. One use is spent whatever happens.
    pub fn use_move(
        &mut self,
        slots: &mut [TargetSlot],
        user: CharacterId,
        others: &[CharacterId],
        ctx: &mut ResolveContext<'_>,
    ) -> MoveUseResult {
        let outcome = self.roll(user, ctx);
        let mut actions = Vec::new();

        if outcome == MoveOutcome::Success {
            let source = ActionSource::Move(self.id);
            let mut candidates = others.to_vec();

            for (index, (action, slot)) in self.actions.iter().zip(slots.iter_mut()).enumerate() {
                let key = ActionKey::new(self.id, index);
                let result = action.apply(slot, user, &candidates, &source, Some(key), ctx);

                candidates.retain(|&id| {
                    let mut hits = result.results.iter().filter(|r| r.target == id).peekable();
                    hits.peek().is_none() || hits.any(|r| r.applied)
                });

                let keep_going = result.success;
                actions.push(result);
                if !keep_going {
                    break;
                }
            }
        }

        self.remaining_uses -= 1;
        debug!(
            "{} used {}: {} ({} uses left)",
            user, self.name, outcome, self.remaining_uses
        );

        MoveUseResult { outcome, actions }
    }

    fn roll(&self, user: CharacterId, ctx: &mut ResolveContext<'_>) -> MoveOutcome {
        let flinched = ctx
            .roster
            .get_mut(user)
            .is_some_and(|character| character.take_flinch());
        if flinched {
            return MoveOutcome::Flinched;
        }
        let streak = ctx.history.consecutive_move_successes(self.id, user);
        self.success.roll(streak, &mut *ctx.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionFailure, Protection, TargetCalculator};
    use crate::combat::DamageCalculator;
    use crate::config::BattleConfig;
    use crate::env::{NoInput, ScriptedRng};
    use crate::history::ActionHistory;
    use crate::state::{Character, CharacterConfig, Roster, TeamId};

    const USER: CharacterId = CharacterId(1);
    const ALLY: CharacterId = CharacterId(2);
    const FOE: CharacterId = CharacterId(3);
    const FOE2: CharacterId = CharacterId(4);
    const OTHERS: [CharacterId; 3] = [ALLY, FOE, FOE2];

    struct Fixture {
        roster: Roster,
        history: ActionHistory,
        config: BattleConfig,
        rng: ScriptedRng,
        input: NoInput,
    }

    impl Fixture {
        fn new(script: &[u32]) -> Self {
            let make = |id: u32, team: u32| {
                Character::new(
                    CharacterConfig::new(CharacterId(id), format!("c{id}"), TeamId(team), 100)
                        .with_stats(20, 10, 10),
                )
                .unwrap()
            };
            Self {
                roster: Roster::new(vec![make(1, 0), make(2, 0), make(3, 1), make(4, 1)]).unwrap(),
                history: ActionHistory::new(),
                config: BattleConfig::default(),
                rng: ScriptedRng::new(script.to_vec()),
                input: NoInput,
            }
        }

        fn ctx(&mut self) -> ResolveContext<'_> {
            ResolveContext::new(
                &mut self.roster,
                &self.history,
                &mut self.rng,
                &mut self.input,
                &self.config,
            )
        }

        fn health(&self, id: CharacterId) -> i32 {
            self.roster.get(id).unwrap().health()
        }

        /// Queue and resolve one use of `mv` by [`USER`].
        fn use_move(&mut self, mv: &mut Move) -> MoveUseResult {
            let mut slots = mv.set_targets(USER, &OTHERS, &mut self.ctx());
            mv.use_move(&mut slots, USER, &OTHERS, &mut self.ctx())
        }
    }

    fn tap(targets: TargetCalculator) -> Action {
        Action::damage(DamageCalculator::Percentage { percent: 10 }, targets)
    }

    fn strike() -> Move {
        Move::new(
            MoveConfig::new(MoveId(1), "Strike", 5).with_action(Action::damage(
                DamageCalculator::BasePower { power: 10 },
                TargetCalculator::FirstEnemy,
            )),
        )
        .unwrap()
    }

    #[test]
    fn rejects_invalid_configs() {
        assert!(matches!(
            Move::new(MoveConfig::new(MoveId(1), " ", 5)),
            Err(ConfigError::EmptyMoveName { .. })
        ));
        assert!(matches!(
            Move::new(MoveConfig::new(MoveId(1), "Nothing", 5)),
            Err(ConfigError::MoveWithoutActions { .. })
        ));
        let zero = MoveConfig::new(MoveId(1), "Zero", 0)
            .with_action(Action::protect(TargetCalculator::User));
        assert!(matches!(Move::new(zero), Err(ConfigError::NonPositiveUses { .. })));
    }

    #[test]
    fn set_max_uses_semantics() {
        let mut mv = strike();
        mv.remaining_uses = 2;

        mv.set_max_uses(8, true);
        assert_eq!((mv.max_uses(), mv.remaining_uses()), (8, 2));

        mv.set_max_uses(10, false);
        assert_eq!((mv.max_uses(), mv.remaining_uses()), (10, 10));

        mv.set_max_uses(3, true);
        assert_eq!((mv.max_uses(), mv.remaining_uses()), (3, 3));
    }

    #[test]
    fn misses_and_failures_still_spend_a_use() {
        let mut fx = Fixture::new(&[99]);
        let mut wild = Move::new(
            MoveConfig::new(MoveId(1), "Wild Swing", 5)
                .with_success(SuccessCalculator::Accuracy { percent: 50 })
                .with_action(tap(TargetCalculator::FirstEnemy)),
        )
        .unwrap();
        let result = fx.use_move(&mut wild);
        assert_eq!(result.outcome, MoveOutcome::Miss);
        assert!(result.actions.is_empty());
        assert_eq!(wild.remaining_uses(), 4);

        let mut fading = Move::new(
            MoveConfig::new(MoveId(2), "Fading Ward", 5)
                .with_success(SuccessCalculator::Decaying { percent: 50, divisor: 2 })
                .with_action(tap(TargetCalculator::FirstEnemy)),
        )
        .unwrap();
        let result = fx.use_move(&mut fading);
        assert_eq!(result.outcome, MoveOutcome::Failure);
        assert!(result.actions.is_empty());
        assert_eq!(fading.remaining_uses(), 4);

        assert_eq!(fx.health(FOE), 100);
    }

    #[test]
    fn accurate_rolls_run_every_action() {
        // accuracy draw 10 < 50, then 20 → 100% variance
        let mut fx = Fixture::new(&[10, 20]);
        let mut aimed = Move::new(
            MoveConfig::new(MoveId(1), "Aimed Shot", 5)
                .with_success(SuccessCalculator::Accuracy { percent: 50 })
                .with_action(Action::damage(
                    DamageCalculator::BasePower { power: 10 },
                    TargetCalculator::FirstEnemy,
                )),
        )
        .unwrap();

        let result = fx.use_move(&mut aimed);

        assert!(result.is_success());
        assert_eq!(result.results().filter(|r| r.applied).count(), 1);
        assert_eq!(fx.health(FOE), 0);
        assert_eq!(aimed.remaining_uses(), 4);
    }

    #[test]
    fn protected_target_sits_out_the_remaining_actions() {
        let mut fx = Fixture::new(&[0]);
        assert!(fx.roster.get_mut(FOE).unwrap().add_protect(FOE2));
        let mut sweep = Move::new(
            MoveConfig::new(MoveId(1), "Double Sweep", 5)
                .with_action(tap(TargetCalculator::Enemies))
                .with_action(tap(TargetCalculator::Enemies)),
        )
        .unwrap();

        let result = fx.use_move(&mut sweep);

        assert_eq!(result.actions.len(), 2);
        assert_eq!(
            result.actions[0].results[0].protection,
            Protection::ProtectedBy(FOE2)
        );
        let second: Vec<CharacterId> = result.actions[1].results.iter().map(|r| r.target).collect();
        assert_eq!(second, vec![FOE2]);
        assert_eq!(fx.health(FOE), 100);
        assert_eq!(fx.health(FOE2), 80);
        assert_eq!(fx.roster.get(FOE).unwrap().protect_count(), 0);
    }

    #[test]
    fn next_hit_lands_once_the_only_protector_is_spent() {
        let mut fx = Fixture::new(&[0]);
        fx.roster.get_mut(FOE).unwrap().add_protect(ALLY);
        let mut jab = Move::new(
            MoveConfig::new(MoveId(1), "Jab", 5).with_action(tap(TargetCalculator::FirstEnemy)),
        )
        .unwrap();

        let blocked = fx.use_move(&mut jab);
        let hit = blocked.results().next().unwrap();
        assert!(!hit.applied);
        assert_eq!(hit.protection, Protection::ProtectedBy(ALLY));
        assert_eq!(fx.health(FOE), 100);

        let landed = fx.use_move(&mut jab);
        let hit = landed.results().next().unwrap();
        assert!(hit.applied);
        assert_eq!(hit.protection, Protection::Unprotected);
        assert_eq!(fx.health(FOE), 90);
        assert_eq!(jab.remaining_uses(), 3);
    }

    #[test]
    fn failed_action_stops_the_move() {
        let mut fx = Fixture::new(&[0]);
        let mut payback = Move::new(
            MoveConfig::new(MoveId(1), "Payback", 5)
                .with_action(tap(TargetCalculator::Retaliation))
                .with_action(tap(TargetCalculator::Enemies)),
        )
        .unwrap();

        let result = fx.use_move(&mut payback);

        assert!(result.is_success());
        assert_eq!(result.actions.len(), 1);
        assert_eq!(result.actions[0].failure, Some(ActionFailure::NoTargetsSet));
        assert_eq!(fx.health(FOE), 100);
        assert_eq!(fx.health(FOE2), 100);
    }

    #[test]
    fn usable_only_with_uses_left() {
        let mut mv = strike();
        assert!(mv.is_usable());
        mv.remaining_uses = 0;
        assert!(!mv.is_usable());
    }
}
