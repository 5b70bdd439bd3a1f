//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`BattleConfig`] from a TOML file.
    ///
    /// Missing keys fall back to the engine defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid battle config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_files_keep_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "spread_percent = 50\nmax_rounds = 20").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.spread_percent, 50);
        assert_eq!(config.max_rounds, Some(20));
        assert_eq!(config.variance_min, BattleConfig::DEFAULT_VARIANCE_MIN);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let err = ConfigLoader::parse("variance_min = 90\nvariance_max = 10").unwrap_err();
        assert!(err.to_string().contains("Invalid battle config"));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = ConfigLoader::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
