//! Success rolls for moves and flinch actions.

use crate::env::RandomSource;
use crate::moves::MoveOutcome;

/// Decides whether a move (or a flinch) goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SuccessCalculator {
    /// Always succeeds without drawing from the random source.
    #[default]
    Always,

    /// Succeeds when `next(100) < percent`, otherwise [`MoveOutcome::Miss`].
    Accuracy { percent: u32 },

    /// Chance `percent / divisor^streak`, otherwise [`MoveOutcome::Failure`].
    ///
    /// `streak` is the user's run of consecutive successes, so repeated use
    /// gets less and less reliable.
    Decaying { percent: u32, divisor: u32 },
}

impl SuccessCalculator {
    /// Roll once. Never returns [`MoveOutcome::Flinched`].
    pub fn roll(&self, streak: u32, rng: &mut dyn RandomSource) -> MoveOutcome {
        match *self {
            SuccessCalculator::Always => MoveOutcome::Success,
            SuccessCalculator::Accuracy { percent } => {
                if rng.next(100) < percent {
                    MoveOutcome::Success
                } else {
                    MoveOutcome::Miss
                }
            }
            SuccessCalculator::Decaying { percent, divisor } => {
                // roll against 100 × divisor^streak instead of dividing the chance
                let scale = divisor
                    .checked_pow(streak)
                    .and_then(|d| d.checked_mul(100));
                match scale {
                    Some(scale) if rng.next(scale) < percent => MoveOutcome::Success,
                    _ => MoveOutcome::Failure,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    #[test]
    fn always_does_not_draw() {
        let mut rng = ScriptedRng::new([99]);
        assert_eq!(SuccessCalculator::Always.roll(7, &mut rng), MoveOutcome::Success);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn accuracy_misses_at_or_above_percent() {
        let calc = SuccessCalculator::Accuracy { percent: 75 };
        assert_eq!(calc.roll(0, &mut ScriptedRng::new([74])), MoveOutcome::Success);
        assert_eq!(calc.roll(0, &mut ScriptedRng::new([75])), MoveOutcome::Miss);
    }

    #[test]
    fn decaying_halves_per_streak() {
        let calc = SuccessCalculator::Decaying {
            percent: 100,
            divisor: 2,
        };
        // streak 0: roll in [0, 100), always below 100
        assert_eq!(calc.roll(0, &mut ScriptedRng::new([99])), MoveOutcome::Success);
        // streak 1: roll in [0, 200), 150 fails
        assert_eq!(calc.roll(1, &mut ScriptedRng::new([150])), MoveOutcome::Failure);
        assert_eq!(calc.roll(1, &mut ScriptedRng::new([50])), MoveOutcome::Success);
    }

    #[test]
    fn decaying_overflow_fails() {
        let calc = SuccessCalculator::Decaying {
            percent: 100,
            divisor: 10,
        };
        assert_eq!(calc.roll(40, &mut ScriptedRng::new([0])), MoveOutcome::Failure);
    }
}
