//! CLI runtime configuration.
use std::env;
use std::path::PathBuf;

/// Where the battle comes from and how it is seeded.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub config_path: PathBuf,
    pub roster_path: PathBuf,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        Self {
            config_path: data.join("battle.toml"),
            roster_path: data.join("roster.ron"),
            seed: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONFIG` - TOML battle config (default: bundled `data/battle.toml`)
    /// - `BATTLE_ROSTER` - RON roster catalog (default: bundled `data/roster.ron`)
    /// - `BATTLE_SEED` - RNG seed for a reproducible battle (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("BATTLE_CONFIG") {
            config.config_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("BATTLE_ROSTER") {
            config.roster_path = PathBuf::from(path);
        }
        config.seed = read_env::<u64>("BATTLE_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
