//! Stat multiplier deltas.

use super::CalcInput;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffCalculator {
    /// Same delta every time.
    Flat { amount: f64 },

    /// `amount + step × min(streak, cap)`, where streak counts the user's
    /// consecutive landed uses of this action.
    Escalating { amount: f64, step: f64, cap: u32 },
}

impl BuffCalculator {
    pub fn calculate(&self, input: &CalcInput<'_>) -> Option<f64> {
        let delta = match *self {
            BuffCalculator::Flat { amount } => amount,
            BuffCalculator::Escalating { amount, step, cap } => {
                let streak = input.action_streak().min(cap);
                amount + step * f64::from(streak)
            }
        };
        delta.is_finite().then_some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionKey;
    use crate::config::BattleConfig;
    use crate::history::ActionHistory;
    use crate::state::{Character, CharacterConfig, CharacterId, MoveId, TeamId};

    #[test]
    fn escalating_without_history_uses_base_amount() {
        let user =
            Character::new(CharacterConfig::new(CharacterId(1), "a", TeamId(0), 10)).unwrap();
        let history = ActionHistory::new();
        let config = BattleConfig::default();
        let input = CalcInput {
            user: &user,
            target: &user,
            target_count: 1,
            key: Some(ActionKey::new(MoveId(1), 0)),
            history: &history,
            config: &config,
        };
        let calc = BuffCalculator::Escalating {
            amount: 0.5,
            step: 0.25,
            cap: 3,
        };
        assert_eq!(calc.calculate(&input), Some(0.5));
        assert_eq!(BuffCalculator::Flat { amount: -0.5 }.calculate(&input), Some(-0.5));
    }
}
