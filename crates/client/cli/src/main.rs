//! Console battle runner.
mod config;
mod output;
mod rng;

use anyhow::Result;
use battle_content::{ConfigLoader, RosterLoader};
use battle_core::{RandomSource, TurnBasedBattle};
use config::CliConfig;
use output::ConsoleOutput;
use rng::StdRandom;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    tracing::info!("Battle config: {}", config.config_path.display());
    tracing::info!("Roster: {}", config.roster_path.display());

    let battle_config = ConfigLoader::load(&config.config_path)?;
    let loaded = RosterLoader::load(&config.roster_path, &battle_config)?;

    let rng: Box<dyn RandomSource> = match config.seed {
        Some(seed) => {
            tracing::info!("Seed: {}", seed);
            Box::new(StdRandom::seeded(seed))
        }
        None => Box::new(StdRandom::from_entropy()),
    };

    let mut battle = TurnBasedBattle::new(loaded.roster, loaded.move_sets, rng, battle_config)?
        .with_output(Box::new(ConsoleOutput));
    let outcome = battle.run();
    tracing::info!("Battle finished: {:?}", outcome);

    Ok(())
}

/// Logs go to stderr so the battle transcript on stdout stays readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
