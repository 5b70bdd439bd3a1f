//! Errors surfaced by the battle engine.

use crate::error::{ConfigError, ErrorSeverity, GameError};

/// Errors surfaced while building a battle.
///
/// Bad move selections during a round are not errors here: the engine logs
/// the [`MoveSetError`](crate::MoveSetError) and skips the character.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("invalid battle setup: {0}")]
    Config(#[from] ConfigError),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(err) => err.error_code(),
        }
    }
}
