//! Deterministic turn-based combat resolution.
//!
//! `battle-core` defines the rules (actions, moves, target selection,
//! protection, history-driven calculators) and the round loop that drives
//! them. Clients construct a [`TurnBasedBattle`] from a [`Roster`] and one
//! [`MoveSet`] per character, inject a [`RandomSource`] plus optional
//! chooser / input / output collaborators, and call
//! [`TurnBasedBattle::run`].
//!
//! Characters are referenced by [`CharacterId`] everywhere; the battle owns
//! them and hands a [`ResolveContext`] to whatever is resolving.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod history;
pub mod moves;
pub mod state;
pub mod stats;

pub use action::{
    Action, ActionFailure, ActionKey, ActionKind, ActionResult, ActionSource, ActionTags,
    ActionUseResult, EffectDelta, EffectKind, ProtectOutcome, Protection, ResolveContext,
    TargetCalculator, TargetOutcome, TargetSlot,
};
pub use combat::{
    BuffCalculator, CalcInput, DamageCalculator, HealCalculator, SuccessCalculator,
    base_power_damage,
};
pub use config::BattleConfig;
pub use engine::{BattleError, BattleOutcome, BattlePhase, MoveProcessor, TurnBasedBattle};
pub use env::{
    BattleOutput, FirstCandidate, MoveChooser, NoInput, NullOutput, PcgRng, RandomMoveChooser,
    RandomSource, ScriptedRng, TargetInput,
};
pub use error::{ConfigError, ErrorSeverity, GameError};
pub use history::ActionHistory;
pub use moves::{Move, MoveConfig, MoveOutcome, MoveSet, MoveSetError, MoveUse, MoveUseResult};
pub use state::{
    Character, CharacterConfig, CharacterError, CharacterId, Item, ItemSlot, MoveId, Roster,
    TeamId,
};
pub use stats::{Stat, StatBlock, StatKind, ValueTransform, apply_chain};
