//! Healing amounts. Clamping to max health is the character's job.

use super::CalcInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealCalculator {
    Flat { amount: i32 },
    /// Share of the target's max health, at least 1.
    Percentage { percent: u32 },
}

impl HealCalculator {
    pub fn calculate(&self, input: &CalcInput<'_>) -> Option<i32> {
        match *self {
            HealCalculator::Flat { amount } => Some(amount.max(0)),
            HealCalculator::Percentage { percent } => {
                let share = i64::from(input.target.max_health()) * i64::from(percent) / 100;
                Some(share.clamp(1, i64::from(i32::MAX)) as i32)
            }
        }
    }
}
