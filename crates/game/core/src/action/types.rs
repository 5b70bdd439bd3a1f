//! Core action types and structures.
//!
//! This module defines the values produced by action application:
//! - `ActionSource`: whether a move or an item caused an effect
//! - `ActionResult`: what happened to one target
//! - `ActionUseResult`: the outcome of one action use across all its targets

use bitflags::bitflags;

use crate::state::{CharacterId, MoveId};
use crate::stats::StatKind;

bitflags! {
    /// Provenance and behavioral markers carried by an action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ActionTags: u8 {
        /// Hits back at whoever last damaged the user.
        const RETALIATION  = 1 << 0;
        /// Item action run during the start-of-turn phase.
        const START_OF_TURN = 1 << 1;
        /// Item action run during the end-of-turn phase.
        const END_OF_TURN   = 1 << 2;
    }
}

/// What caused an action to be applied.
///
/// History keeps item-caused results apart from move-caused ones; retaliation
/// only ever looks at move-caused damage.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionSource {
    Move(MoveId),
    Item(String),
}

impl ActionSource {
    pub fn is_move(&self) -> bool {
        matches!(self, ActionSource::Move(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self, ActionSource::Item(_))
    }
}

/// Identifies one action inside one move, for action-level history streaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub move_id: MoveId,
    pub index: usize,
}

impl ActionKey {
    pub fn new(move_id: MoveId, index: usize) -> Self {
        Self { move_id, index }
    }
}

/// Effect category of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Damage,
    Buff,
    Heal,
    Flinch,
    Protect,
    ProtectLimitChange,
}

/// Whether a target's protect queue blocked the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Protection {
    #[default]
    Unprotected,
    ProtectedBy(CharacterId),
}

impl Protection {
    pub fn is_protected(self) -> bool {
        matches!(self, Protection::ProtectedBy(_))
    }

    pub fn protector(self) -> Option<CharacterId> {
        match self {
            Protection::ProtectedBy(protector) => Some(protector),
            Protection::Unprotected => None,
        }
    }
}

/// Outcome of trying to queue a protector on a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProtectOutcome {
    Added,
    /// Queue already held `limit` protectors; nothing changed.
    LimitReached,
}

/// Effect-specific before/after state of one application.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectDelta {
    Damage {
        amount: i32,
        health_before: i32,
        health_after: i32,
    },
    Heal {
        amount: i32,
        health_before: i32,
        health_after: i32,
    },
    Buff {
        stat: StatKind,
        change: f64,
        multiplier_before: f64,
        multiplier_after: f64,
    },
    Flinch {
        /// Whether the success roll landed.
        landed: bool,
    },
    Protect {
        outcome: ProtectOutcome,
        queue_before: usize,
        queue_after: usize,
    },
    ProtectLimitChange {
        limit_before: i32,
        limit_after: i32,
    },
}

/// Result of applying one action to one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    /// Whether the effect actually landed.
    pub applied: bool,

    /// Character performing the action.
    pub user: CharacterId,

    pub source: ActionSource,

    pub target: CharacterId,

    pub protection: Protection,

    pub kind: EffectKind,

    /// Tags of the action that produced this result.
    pub tags: ActionTags,

    /// `None` when the target was protected and nothing was mutated.
    pub delta: Option<EffectDelta>,
}

impl ActionResult {
    /// Result for an effect blocked by `protector`.
    pub fn protected(
        user: CharacterId,
        source: ActionSource,
        target: CharacterId,
        protector: CharacterId,
        kind: EffectKind,
        tags: ActionTags,
    ) -> Self {
        Self {
            applied: false,
            user,
            source,
            target,
            protection: Protection::ProtectedBy(protector),
            kind,
            tags,
            delta: None,
        }
    }

    /// Damage dealt, if this is an applied damage result.
    pub fn damage_dealt(&self) -> Option<i32> {
        match (&self.delta, self.applied) {
            (Some(EffectDelta::Damage { amount, .. }), true) => Some(*amount),
            _ => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.protection.is_protected()
    }
}

/// Why an action use produced no results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionFailure {
    /// The target calculator found nothing, or targets were never set.
    NoTargetsSet,
    /// A per-target magnitude could not be computed.
    CalculationFailed,
}

/// Outcome of one action use.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionUseResult {
    pub success: bool,
    pub failure: Option<ActionFailure>,
    /// One entry per live target, in target order.
    pub results: Vec<ActionResult>,
}

impl ActionUseResult {
    pub fn failed(reason: ActionFailure) -> Self {
        Self {
            success: false,
            failure: Some(reason),
            results: Vec::new(),
        }
    }

    pub fn succeeded(results: Vec<ActionResult>) -> Self {
        Self {
            success: true,
            failure: None,
            results,
        }
    }

    pub fn any_applied(&self) -> bool {
        self.results.iter().any(|r| r.applied)
    }

    /// Counts toward an action-level streak: used and landed at least once.
    pub fn landed(&self) -> bool {
        self.success && self.any_applied()
    }
}
