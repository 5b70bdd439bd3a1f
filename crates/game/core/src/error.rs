//! Common error infrastructure for battle-core.
//!
//! This module provides shared types and traits used across all error types in battle-core.
//! Domain-specific errors (e.g., `CharacterError`, `MoveSetError`) are defined in their
//! respective modules alongside the operations that raise them.
//!
//! # Design Principles
//!
//! - **Results, not errors**: a missed move, a protected target or an action with no
//!   targets is an ordinary outcome and never surfaces here
//! - **Configuration fails fast**: invalid content is rejected at construction time
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::state::{CharacterId, MoveId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: the caller can ask again (e.g., re-prompt for a move index)
/// - **Internal**: a broken call contract inside the engine
/// - **Fatal**: content or wiring is unusable, the battle cannot start
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with the same or an alternative choice.
    Recoverable,

    /// Internal error - a call contract was violated.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - the battle cannot be constructed or continued.
    Fatal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Content or wiring mistakes detected while constructing battle objects.
///
/// Every variant is fatal: the offending object is never created.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("character {id} has an empty name")]
    EmptyCharacterName { id: CharacterId },

    #[error("character {id} must have positive max health, got {max_health}")]
    NonPositiveHealth { id: CharacterId, max_health: i32 },

    #[error("character {id} appears more than once in the roster")]
    DuplicateCharacter { id: CharacterId },

    #[error("move {id} has an empty name")]
    EmptyMoveName { id: MoveId },

    #[error("move {id} ({name}) has no actions")]
    MoveWithoutActions { id: MoveId, name: String },

    #[error("move {id} ({name}) must allow at least one use, got {max_uses}")]
    NonPositiveUses {
        id: MoveId,
        name: String,
        max_uses: i32,
    },

    #[error("character {id} has no move set")]
    MissingMoveSet { id: CharacterId },

    #[error("a battle needs at least two teams, found {teams}")]
    NotEnoughTeams { teams: usize },

    #[error("variance range {min}..={max} is empty")]
    EmptyVarianceRange { min: u32, max: u32 },

    #[error("spread percent must be positive")]
    ZeroSpreadPercent,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ConfigError::*;
        match self {
            EmptyCharacterName { .. } => "CONFIG_EMPTY_CHARACTER_NAME",
            NonPositiveHealth { .. } => "CONFIG_NON_POSITIVE_HEALTH",
            DuplicateCharacter { .. } => "CONFIG_DUPLICATE_CHARACTER",
            EmptyMoveName { .. } => "CONFIG_EMPTY_MOVE_NAME",
            MoveWithoutActions { .. } => "CONFIG_MOVE_WITHOUT_ACTIONS",
            NonPositiveUses { .. } => "CONFIG_NON_POSITIVE_USES",
            MissingMoveSet { .. } => "CONFIG_MISSING_MOVE_SET",
            NotEnoughTeams { .. } => "CONFIG_NOT_ENOUGH_TEAMS",
            EmptyVarianceRange { .. } => "CONFIG_EMPTY_VARIANCE_RANGE",
            ZeroSpreadPercent => "CONFIG_ZERO_SPREAD_PERCENT",
        }
    }
}
