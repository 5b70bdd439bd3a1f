//! Base stats and their additive multipliers.
//!
//! Current = floor(Base × max(0, 1 + Multiplier))
//!
//! Multipliers change through buff actions and accumulate additively: two
//! +0.5 buffs give ×2, a total of -1.0 or below floors the stat at zero.

/// The three combat stats every character carries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Attack,
    Defence,
    Speed,
}

/// A single stat: an immutable base value and an additive multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    base: i32,
    multiplier: f64,
}

impl Stat {
    /// Create a stat with no multiplier applied.
    pub fn new(base: i32) -> Self {
        Self {
            base,
            multiplier: 0.0,
        }
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Current value before any item transform.
    pub fn value(&self) -> i32 {
        let scale = (1.0 + self.multiplier).max(0.0);
        (f64::from(self.base) * scale).floor() as i32
    }

    /// Adds `delta` to the multiplier and returns `(before, after)`.
    pub fn change_multiplier(&mut self, delta: f64) -> (f64, f64) {
        let before = self.multiplier;
        self.multiplier += delta;
        (before, self.multiplier)
    }
}

/// Attack, defence and speed of one character.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub attack: Stat,
    pub defence: Stat,
    pub speed: Stat,
}

impl StatBlock {
    /// Create a stat block from base values.
    pub fn new(attack: i32, defence: i32, speed: i32) -> Self {
        Self {
            attack: Stat::new(attack),
            defence: Stat::new(defence),
            speed: Stat::new(speed),
        }
    }

    pub fn get(&self, kind: StatKind) -> &Stat {
        match kind {
            StatKind::Attack => &self.attack,
            StatKind::Defence => &self.defence,
            StatKind::Speed => &self.speed,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut Stat {
        match kind {
            StatKind::Attack => &mut self.attack,
            StatKind::Defence => &mut self.defence,
            StatKind::Speed => &mut self.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_scales_base() {
        let mut stat = Stat::new(20);
        assert_eq!(stat.value(), 20);

        let (before, after) = stat.change_multiplier(0.5);
        assert_eq!(before, 0.0);
        assert_eq!(after, 0.5);
        assert_eq!(stat.value(), 30);

        stat.change_multiplier(-0.75);
        // 20 × 0.75 = 15
        assert_eq!(stat.value(), 15);

        stat.change_multiplier(-1.0);
        assert_eq!(stat.multiplier(), -1.25);
        assert_eq!(stat.value(), 0);
    }

    #[test]
    fn stat_kind_parses_case_insensitively() {
        assert_eq!("DEFENCE".parse::<StatKind>(), Ok(StatKind::Defence));
        assert_eq!(StatKind::Speed.to_string(), "speed");
    }
}
