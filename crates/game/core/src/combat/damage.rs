//! Damage calculation.

use crate::env::RandomSource;

use super::CalcInput;

// ============================================================================
// Damage Calculator
// ============================================================================

/// How much health an action removes from one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCalculator {
    /// Attack-vs-defence formula scaled by `power`.
    BasePower { power: u32 },

    /// Fixed share of the target's max health.
    Percentage { percent: u32 },

    /// Base-power formula with `power` doubled for every consecutive landed
    /// use of this action by the user, up to `cap` doublings.
    Escalating { power: u32, cap: u32 },

    /// Share of the last move damage the user took this turn.
    Counter { percent: u32 },
}

impl DamageCalculator {
    /// Damage against `input.target`, or `None` when it cannot be computed.
    ///
    /// Successful results are always at least 1.
    pub fn calculate(&self, input: &CalcInput<'_>, rng: &mut dyn RandomSource) -> Option<i32> {
        match *self {
            DamageCalculator::BasePower { power } => Some(roll_base_power(power.into(), input, rng)),
            DamageCalculator::Percentage { percent } => {
                Some(percent_of(input.target.max_health(), percent))
            }
            DamageCalculator::Escalating { power, cap } => {
                let doublings = input.action_streak().min(cap).min(32);
                let power = i64::from(power).saturating_mul(1_i64 << doublings);
                Some(roll_base_power(power, input, rng))
            }
            DamageCalculator::Counter { percent } => {
                let taken = input
                    .history
                    .last_damage_against(input.user.id())?
                    .damage_dealt()?;
                Some(percent_of(taken, percent))
            }
        }
    }
}

// ============================================================================
// Formulas
// ============================================================================

/// Core damage formula.
///
/// ```text
/// raw    = power × (attack − defence)
/// varied = raw × variance / 100
/// spread = varied × spread_percent / 100   (only when hitting > 1 target)
/// damage = max(1, spread)
/// ```
///
/// `power` must already carry the user's item transforms.
pub fn base_power_damage(
    power: i64,
    attack: i32,
    defence: i32,
    variance: u32,
    target_count: usize,
    spread_percent: u32,
) -> i32 {
    let raw = power.saturating_mul(i64::from(attack) - i64::from(defence));
    let mut damage = raw.saturating_mul(i64::from(variance)) / 100;
    if target_count > 1 {
        damage = damage.saturating_mul(i64::from(spread_percent)) / 100;
    }
    damage.clamp(1, i64::from(i32::MAX)) as i32
}

fn roll_base_power(power: i64, input: &CalcInput<'_>, rng: &mut dyn RandomSource) -> i32 {
    let power = input.user.transform_power(power);
    let config = input.config;
    let variance = rng.next_in_range(config.variance_min, config.variance_max.saturating_add(1));
    base_power_damage(
        power,
        input.user.attack(),
        input.target.defence(),
        variance,
        input.target_count,
        config.spread_percent,
    )
}

fn percent_of(value: i32, percent: u32) -> i32 {
    let share = i64::from(value).saturating_mul(i64::from(percent)) / 100;
    share.clamp(1, i64::from(i32::MAX)) as i32
}
