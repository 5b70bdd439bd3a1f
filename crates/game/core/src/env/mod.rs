//! Collaborators the engine consumes but does not own.
//!
//! - [`RandomSource`]: uniform integers for picks and rolls
//! - [`TargetInput`] / [`MoveChooser`]: decisions made outside the engine
//! - [`BattleOutput`]: display sink
//!
//! Runtimes wire concrete implementations into
//! [`TurnBasedBattle`](crate::TurnBasedBattle); the defaults here are
//! deterministic and side-effect free.

pub mod input;
pub mod output;
pub mod rng;

pub use input::{FirstCandidate, MoveChooser, NoInput, RandomMoveChooser, TargetInput};
pub use output::{BattleOutput, NullOutput};
pub use rng::{PcgRng, RandomSource, ScriptedRng};
