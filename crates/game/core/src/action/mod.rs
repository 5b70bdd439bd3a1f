//! Actions: the atomic effects a move or an item applies.
//!
//! An [`Action`] is an immutable template (effect kind + target calculator +
//! tags). Using it is a two-phase protocol driven by the caller:
//!
//! 1. [`Action::set_targets`] produces a [`TargetSlot`] when the move is
//!    queued. Reactive calculators leave the slot [`TargetSlot::Deferred`].
//! 2. [`Action::apply`] consumes the slot when the action executes, narrows
//!    cached targets to the candidates still in play, and applies the effect
//!    to each living target.
//!
//! Per-use state lives in the slot, never in the template, so the same
//! action can be queued by several characters in one round.

pub mod context;
pub mod targeting;
pub mod types;

pub use context::ResolveContext;
pub use targeting::{TargetCalculator, TargetOutcome, TargetSlot};
pub use types::{
    ActionFailure, ActionKey, ActionResult, ActionSource, ActionTags, ActionUseResult,
    EffectDelta, EffectKind, ProtectOutcome, Protection,
};

use tracing::debug;

use crate::combat::{BuffCalculator, CalcInput, DamageCalculator, HealCalculator, SuccessCalculator};
use crate::moves::MoveOutcome;
use crate::state::CharacterId;
use crate::stats::StatKind;

// ============================================================================
// Action Template
// ============================================================================

/// Effect payload of an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Damage(DamageCalculator),
    Buff {
        stat: StatKind,
        calculator: BuffCalculator,
    },
    Heal(HealCalculator),
    /// Sets the target's flinch flag when the roll succeeds.
    Flinch(SuccessCalculator),
    /// Queues the user as a protector on the target.
    Protect,
    /// Adds `amount` to the target's protect limit.
    ProtectLimitChange {
        amount: i32,
    },
}

impl ActionKind {
    pub fn effect_kind(&self) -> EffectKind {
        match self {
            ActionKind::Damage(_) => EffectKind::Damage,
            ActionKind::Buff { .. } => EffectKind::Buff,
            ActionKind::Heal(_) => EffectKind::Heal,
            ActionKind::Flinch(_) => EffectKind::Flinch,
            ActionKind::Protect => EffectKind::Protect,
            ActionKind::ProtectLimitChange { .. } => EffectKind::ProtectLimitChange,
        }
    }
}

/// Immutable action template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub kind: ActionKind,
    pub targets: TargetCalculator,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: ActionTags,
}

impl Action {
    pub fn new(kind: ActionKind, targets: TargetCalculator) -> Self {
        Self {
            kind,
            targets,
            tags: ActionTags::empty(),
        }
    }

    pub fn damage(calculator: DamageCalculator, targets: TargetCalculator) -> Self {
        Self::new(ActionKind::Damage(calculator), targets)
    }

    pub fn heal(calculator: HealCalculator, targets: TargetCalculator) -> Self {
        Self::new(ActionKind::Heal(calculator), targets)
    }

    pub fn buff(stat: StatKind, calculator: BuffCalculator, targets: TargetCalculator) -> Self {
        Self::new(ActionKind::Buff { stat, calculator }, targets)
    }

    pub fn flinch(success: SuccessCalculator, targets: TargetCalculator) -> Self {
        Self::new(ActionKind::Flinch(success), targets)
    }

    pub fn protect(targets: TargetCalculator) -> Self {
        Self::new(ActionKind::Protect, targets)
    }

    pub fn protect_limit_change(amount: i32, targets: TargetCalculator) -> Self {
        Self::new(ActionKind::ProtectLimitChange { amount }, targets)
    }

    pub fn with_tags(mut self, tags: ActionTags) -> Self {
        self.tags |= tags;
        self
    }

    pub fn effect_kind(&self) -> EffectKind {
        self.kind.effect_kind()
    }

    pub fn is_reactive(&self) -> bool {
        self.targets.is_reactive()
    }

    // ========================================================================
    // Two-phase use
    // ========================================================================

    /// Phase one: establish targets for a queued use.
    pub fn set_targets(
        &self,
        user: CharacterId,
        others: &[CharacterId],
        ctx: &mut ResolveContext<'_>,
    ) -> TargetSlot {
        if self.is_reactive() {
            return TargetSlot::Deferred;
        }
        TargetSlot::Set(self.targets.calculate(user, others, ctx))
    }

    /// Phase two: apply the effect. Leaves `slot` as [`TargetSlot::Consumed`].
    ///
    /// `others` is the current candidate set; cached targets outside it (other
    /// than the user) are dropped before anything is applied.
    pub fn apply(
        &self,
        slot: &mut TargetSlot,
        user: CharacterId,
        others: &[CharacterId],
        source: &ActionSource,
        key: Option<ActionKey>,
        ctx: &mut ResolveContext<'_>,
    ) -> ActionUseResult {
        let outcome = match std::mem::replace(slot, TargetSlot::Consumed) {
            TargetSlot::Deferred => self
                .targets
                .calculate(user, others, ctx)
                .narrowed(user, others),
            TargetSlot::Set(outcome) => outcome.narrowed(user, others),
            TargetSlot::Unset | TargetSlot::Consumed => TargetOutcome::failure(),
        };
        if !outcome.success || outcome.targets.is_empty() {
            debug!(
                "{} action of {} found no targets",
                self.effect_kind(),
                user
            );
            return ActionUseResult::failed(ActionFailure::NoTargetsSet);
        }

        let targets: Vec<CharacterId> = outcome
            .targets
            .into_iter()
            .filter(|&id| ctx.roster.is_alive(id))
            .collect();

        // all magnitudes up front: one failure aborts the whole use
        let Some(planned) = self.plan(user, &targets, key, ctx) else {
            debug!(
                "{} action of {} could not compute its magnitudes",
                self.effect_kind(),
                user
            );
            return ActionUseResult::failed(ActionFailure::CalculationFailed);
        };

        let kind = self.effect_kind();
        let mut results = Vec::with_capacity(targets.len());
        for (target, effect) in targets.into_iter().zip(planned) {
            let Some(character) = ctx.roster.get_mut(target) else {
                continue;
            };
            if let Some(protector) = character.protect_against(user) {
                results.push(ActionResult::protected(
                    user,
                    source.clone(),
                    target,
                    protector,
                    kind,
                    self.tags,
                ));
                continue;
            }

            let Some((applied, delta)) = effect.apply(user, target, key, ctx) else {
                continue;
            };
            debug!("{} -> {}: {:?}", user, target, delta);
            results.push(ActionResult {
                applied,
                user,
                source: source.clone(),
                target,
                protection: Protection::Unprotected,
                kind,
                tags: self.tags,
                delta: Some(delta),
            });
        }

        ActionUseResult::succeeded(results)
    }

    /// Per-target effects with magnitudes resolved. `None` if any fails.
    fn plan(
        &self,
        user: CharacterId,
        targets: &[CharacterId],
        key: Option<ActionKey>,
        ctx: &mut ResolveContext<'_>,
    ) -> Option<Vec<PlannedEffect>> {
        let roster = &*ctx.roster;
        let rng = &mut *ctx.rng;
        let history = ctx.history;
        let config = ctx.config;
        let user_character = roster.get(user)?;

        targets
            .iter()
            .map(|&target| {
                let input = CalcInput {
                    user: user_character,
                    target: roster.get(target)?,
                    target_count: targets.len(),
                    key,
                    history,
                    config,
                };
                let effect = match &self.kind {
                    ActionKind::Damage(calculator) => {
                        PlannedEffect::Damage(calculator.calculate(&input, rng)?)
                    }
                    ActionKind::Heal(calculator) => PlannedEffect::Heal(calculator.calculate(&input)?),
                    ActionKind::Buff { stat, calculator } => {
                        PlannedEffect::Buff(*stat, calculator.calculate(&input)?)
                    }
                    ActionKind::Flinch(success) => PlannedEffect::Flinch(*success),
                    ActionKind::Protect => PlannedEffect::Protect,
                    ActionKind::ProtectLimitChange { amount } => {
                        PlannedEffect::ProtectLimitChange(*amount)
                    }
                };
                Some(effect)
            })
            .collect()
    }
}

/// One target's effect with its magnitude already computed.
#[derive(Clone, Copy, Debug)]
enum PlannedEffect {
    Damage(i32),
    Heal(i32),
    Buff(StatKind, f64),
    Flinch(SuccessCalculator),
    Protect,
    ProtectLimitChange(i32),
}

impl PlannedEffect {
    /// Mutate one unprotected target. Returns `(applied, delta)`.
    fn apply(
        self,
        user: CharacterId,
        target: CharacterId,
        key: Option<ActionKey>,
        ctx: &mut ResolveContext<'_>,
    ) -> Option<(bool, EffectDelta)> {
        let streak = key.map_or(0, |key| ctx.history.consecutive_action_successes(key, user));
        let rng = &mut *ctx.rng;
        let character = ctx.roster.get_mut(target)?;

        let applied = match self {
            PlannedEffect::Damage(amount) => {
                let (health_before, health_after) = character.take_damage(amount);
                (
                    true,
                    EffectDelta::Damage {
                        amount,
                        health_before,
                        health_after,
                    },
                )
            }
            PlannedEffect::Heal(amount) => {
                let (health_before, health_after) = character.heal(amount);
                (
                    true,
                    EffectDelta::Heal {
                        amount,
                        health_before,
                        health_after,
                    },
                )
            }
            PlannedEffect::Buff(stat, change) => {
                let (multiplier_before, multiplier_after) = character.change_multiplier(stat, change);
                (
                    true,
                    EffectDelta::Buff {
                        stat,
                        change,
                        multiplier_before,
                        multiplier_after,
                    },
                )
            }
            PlannedEffect::Flinch(success) => {
                let landed = success.roll(streak, rng) == MoveOutcome::Success;
                if landed {
                    character.set_flinch();
                }
                (landed, EffectDelta::Flinch { landed })
            }
            PlannedEffect::Protect => {
                let queue_before = character.protect_count();
                let added = character.add_protect(user);
                let outcome = if added {
                    ProtectOutcome::Added
                } else {
                    ProtectOutcome::LimitReached
                };
                (
                    added,
                    EffectDelta::Protect {
                        outcome,
                        queue_before,
                        queue_after: character.protect_count(),
                    },
                )
            }
            PlannedEffect::ProtectLimitChange(amount) => {
                let (limit_before, limit_after) = character.change_protect_limit(amount);
                (
                    true,
                    EffectDelta::ProtectLimitChange {
                        limit_before,
                        limit_after,
                    },
                )
            }
        };
        Some(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{NoInput, ScriptedRng};
    use crate::history::ActionHistory;
    use crate::state::{Character, CharacterConfig, MoveId, Roster, TeamId};

    const USER: CharacterId = CharacterId(1);
    const ALLY: CharacterId = CharacterId(2);
    const FOE: CharacterId = CharacterId(3);
    const FOE2: CharacterId = CharacterId(4);

    fn roster() -> Roster {
        let make = |id: u32, team: u32| {
            Character::new(
                CharacterConfig::new(CharacterId(id), format!("c{id}"), TeamId(team), 100)
                    .with_stats(20, 10, 10),
            )
            .unwrap()
        };
        Roster::new(vec![make(1, 0), make(2, 0), make(3, 1), make(4, 1)]).unwrap()
    }

    struct Fixture {
        roster: Roster,
        history: ActionHistory,
        config: BattleConfig,
        rng: ScriptedRng,
        input: NoInput,
    }

    impl Fixture {
        fn new(script: &[u32]) -> Self {
            Self {
                roster: roster(),
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
    }

    fn source() -> ActionSource {
        ActionSource::Move(MoveId(1))
    }

    #[test]
    fn damage_hits_every_enemy_with_spread_penalty() {
        // variance script 20 → 100%
        let mut fx = Fixture::new(&[20]);
        let action = Action::damage(DamageCalculator::BasePower { power: 20 }, TargetCalculator::Enemies);
        let others = vec![ALLY, FOE, FOE2];

        let mut slot = action.set_targets(USER, &others, &mut fx.ctx());
        let result = action.apply(&mut slot, USER, &others, &source(), None, &mut fx.ctx());

        assert!(result.success);
        assert_eq!(result.results.len(), 2);
        assert!(result.results.iter().all(|r| r.damage_dealt() == Some(140)));
        assert_eq!(fx.roster.get(FOE).unwrap().health(), 0);
        assert_eq!(slot, TargetSlot::Consumed);
    }

    #[test]
    fn consumed_slot_cannot_be_applied_twice() {
        let mut fx = Fixture::new(&[0]);
        let action = Action::heal(HealCalculator::Flat { amount: 5 }, TargetCalculator::User);
        let mut slot = action.set_targets(USER, &[], &mut fx.ctx());
        assert!(action.apply(&mut slot, USER, &[], &source(), None, &mut fx.ctx()).success);

        let again = action.apply(&mut slot, USER, &[], &source(), None, &mut fx.ctx());
        assert_eq!(again.failure, Some(ActionFailure::NoTargetsSet));
        assert!(again.results.is_empty());
    }

    #[test]
    fn protected_target_blocks_and_consumes_one_protector() {
        let mut fx = Fixture::new(&[20]);
        fx.roster.get_mut(FOE).unwrap().add_protect(FOE2);
        let action = Action::damage(DamageCalculator::Percentage { percent: 10 }, TargetCalculator::FirstEnemy);
        let others = vec![FOE, FOE2];

        let mut slot = action.set_targets(USER, &others, &mut fx.ctx());
        let result = action.apply(&mut slot, USER, &others, &source(), None, &mut fx.ctx());

        let hit = &result.results[0];
        assert!(!hit.applied);
        assert_eq!(hit.protection, Protection::ProtectedBy(FOE2));
        assert_eq!(hit.delta, None);
        assert_eq!(fx.roster.get(FOE).unwrap().protect_count(), 0);
        assert_eq!(fx.roster.get(FOE).unwrap().health(), 100);
    }

    #[test]
    fn self_targeted_effects_ignore_protection() {
        let mut fx = Fixture::new(&[0]);
        fx.roster.get_mut(USER).unwrap().add_protect(ALLY);
        let action = Action::buff(StatKind::Attack, BuffCalculator::Flat { amount: 0.5 }, TargetCalculator::User);

        let mut slot = action.set_targets(USER, &[], &mut fx.ctx());
        let result = action.apply(&mut slot, USER, &[], &source(), None, &mut fx.ctx());

        assert!(result.results[0].applied);
        assert_eq!(fx.roster.get(USER).unwrap().protect_count(), 1);
        assert_eq!(fx.roster.get(USER).unwrap().attack(), 30);
    }

    #[test]
    fn narrowing_drops_targets_no_longer_in_play() {
        let mut fx = Fixture::new(&[20]);
        let action = Action::damage(DamageCalculator::Percentage { percent: 10 }, TargetCalculator::Enemies);
        let others = vec![FOE, FOE2];
        let mut slot = action.set_targets(USER, &others, &mut fx.ctx());

        let result = action.apply(&mut slot, USER, &[FOE2], &source(), None, &mut fx.ctx());
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].target, FOE2);

        let mut slot = action.set_targets(USER, &others, &mut fx.ctx());
        let emptied = action.apply(&mut slot, USER, &[], &source(), None, &mut fx.ctx());
        assert_eq!(emptied.failure, Some(ActionFailure::NoTargetsSet));
    }

    #[test]
    fn failed_calculation_applies_nothing() {
        let mut fx = Fixture::new(&[0]);
        let action = Action::damage(DamageCalculator::Counter { percent: 100 }, TargetCalculator::Enemies);
        let others = vec![FOE, FOE2];
        let mut slot = action.set_targets(USER, &others, &mut fx.ctx());

        let result = action.apply(&mut slot, USER, &others, &source(), None, &mut fx.ctx());
        assert_eq!(result.failure, Some(ActionFailure::CalculationFailed));
        assert_eq!(fx.roster.get(FOE).unwrap().health(), 100);
    }

    #[test]
    fn protect_respects_the_limit() {
        let mut fx = Fixture::new(&[0]);
        let action = Action::protect(TargetCalculator::FirstAlly);
        let others = vec![ALLY];

        let mut first = action.set_targets(USER, &others, &mut fx.ctx());
        let added = action.apply(&mut first, USER, &others, &source(), None, &mut fx.ctx());
        assert!(added.results[0].applied);

        let mut second = action.set_targets(USER, &others, &mut fx.ctx());
        let capped = action.apply(&mut second, USER, &others, &source(), None, &mut fx.ctx());
        let result = &capped.results[0];
        assert!(!result.applied);
        assert!(!result.is_protected());
        assert!(matches!(
            result.delta,
            Some(EffectDelta::Protect {
                outcome: ProtectOutcome::LimitReached,
                queue_before: 1,
                queue_after: 1,
            })
        ));
    }

    #[test]
    fn flinch_sets_the_flag_only_when_it_lands() {
        let mut fx = Fixture::new(&[10, 90]);
        let action = Action::flinch(SuccessCalculator::Accuracy { percent: 50 }, TargetCalculator::Enemies);
        let others = vec![FOE, FOE2];
        let mut slot = action.set_targets(USER, &others, &mut fx.ctx());

        let result = action.apply(&mut slot, USER, &others, &source(), None, &mut fx.ctx());
        assert!(result.results[0].applied);
        assert!(!result.results[1].applied);
        assert!(fx.roster.get(FOE).unwrap().will_flinch());
        assert!(!fx.roster.get(FOE2).unwrap().will_flinch());
    }

    #[test]
    fn reactive_actions_defer_until_applied() {
        let mut fx = Fixture::new(&[0]);
        let action = Action::damage(DamageCalculator::BasePower { power: 10 }, TargetCalculator::Retaliation)
            .with_tags(ActionTags::RETALIATION);
        let mut slot = action.set_targets(USER, &[FOE], &mut fx.ctx());
        assert_eq!(slot, TargetSlot::Deferred);

        let result = action.apply(&mut slot, USER, &[FOE], &source(), None, &mut fx.ctx());
        assert_eq!(result.failure, Some(ActionFailure::NoTargetsSet));
    }
}
