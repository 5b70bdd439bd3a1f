use crate::error::ConfigError;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Protect limit given to characters whose content does not set one.
    pub default_protect_limit: i32,

    /// Lowest damage variance roll, in percent.
    pub variance_min: u32,

    /// Highest damage variance roll, in percent (inclusive).
    pub variance_max: u32,

    /// Damage percentage kept when an action hits more than one target.
    pub spread_percent: u32,

    /// Rounds after which the battle is declared a draw.
    /// `None` lets the battle run until a team is wiped out.
    pub max_rounds: Option<u32>,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PROTECT_LIMIT: i32 = 1;
    pub const DEFAULT_VARIANCE_MIN: u32 = 80;
    pub const DEFAULT_VARIANCE_MAX: u32 = 100;
    pub const DEFAULT_SPREAD_PERCENT: u32 = 70;
    pub const DEFAULT_MAX_ROUNDS: u32 = 500;

    pub fn new() -> Self {
        Self {
            default_protect_limit: Self::DEFAULT_PROTECT_LIMIT,
            variance_min: Self::DEFAULT_VARIANCE_MIN,
            variance_max: Self::DEFAULT_VARIANCE_MAX,
            spread_percent: Self::DEFAULT_SPREAD_PERCENT,
            max_rounds: Some(Self::DEFAULT_MAX_ROUNDS),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: Option<u32>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_variance(mut self, min: u32, max: u32) -> Self {
        self.variance_min = min;
        self.variance_max = max;
        self
    }

    /// Rejects parameter combinations the damage formula cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variance_min > self.variance_max {
            return Err(ConfigError::EmptyVarianceRange {
                min: self.variance_min,
                max: self.variance_max,
            });
        }
        if self.spread_percent == 0 {
            return Err(ConfigError::ZeroSpreadPercent);
        }
        Ok(())
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BattleConfig::default();
        assert_eq!(config.default_protect_limit, 1);
        assert_eq!(config.spread_percent, 70);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_variance_is_rejected() {
        let config = BattleConfig::new().with_variance(100, 80);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyVarianceRange { min: 100, max: 80 })
        );
    }
}
