use std::collections::VecDeque;
use std::sync::Arc;

use crate::config::BattleConfig;
use crate::error::{ConfigError, ErrorSeverity, GameError};
use crate::stats::{StatBlock, StatKind};

use super::common::{CharacterId, TeamId};
use super::item::{Item, ItemSlot};

/// Errors raised by characters when a caller breaks their contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    /// `consume_protect` was called while the protect queue was empty.
    #[error("character {id} has no protect queued")]
    NoProtectQueued { id: CharacterId },
}

impl GameError for CharacterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoProtectQueued { .. } => "CHARACTER_NO_PROTECT_QUEUED",
        }
    }
}

/// Fully populated description of a character, validated by [`Character::new`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterConfig {
    pub id: CharacterId,
    pub name: String,
    pub team: TeamId,
    pub max_health: i32,
    pub attack: i32,
    pub defence: i32,
    pub speed: i32,
    /// Falls back to [`BattleConfig::DEFAULT_PROTECT_LIMIT`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub protect_limit: Option<i32>,
}

impl CharacterConfig {
    pub fn new(id: CharacterId, name: impl Into<String>, team: TeamId, max_health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            team,
            max_health,
            attack: 10,
            defence: 10,
            speed: 10,
            protect_limit: None,
        }
    }

    pub fn with_stats(mut self, attack: i32, defence: i32, speed: i32) -> Self {
        self.attack = attack;
        self.defence = defence;
        self.speed = speed;
        self
    }

    pub fn with_protect_limit(mut self, limit: i32) -> Self {
        self.protect_limit = Some(limit);
        self
    }
}

/// A combatant.
///
/// Characters are never removed from a battle; death is the state
/// `health <= 0`. All mutation happens through action application.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    id: CharacterId,
    name: String,
    team: TeamId,
    max_health: i32,
    health: i32,
    stats: StatBlock,
    item: ItemSlot,
    protect_queue: VecDeque<CharacterId>,
    protect_limit: i32,
    will_flinch: bool,
}

impl Character {
    /// Builds a character at full health.
    pub fn new(config: CharacterConfig) -> Result<Self, ConfigError> {
        if config.name.trim().is_empty() {
            return Err(ConfigError::EmptyCharacterName { id: config.id });
        }
        if config.max_health <= 0 {
            return Err(ConfigError::NonPositiveHealth {
                id: config.id,
                max_health: config.max_health,
            });
        }

        Ok(Self {
            id: config.id,
            name: config.name,
            team: config.team,
            max_health: config.max_health,
            health: config.max_health,
            stats: StatBlock::new(config.attack, config.defence, config.speed),
            item: ItemSlot::new(),
            protect_queue: VecDeque::new(),
            protect_limit: config
                .protect_limit
                .unwrap_or(BattleConfig::DEFAULT_PROTECT_LIMIT),
            will_flinch: false,
        })
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    // ===== health =====

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// Subtracts `amount` (clamped at zero health). Returns `(before, after)`.
    pub fn take_damage(&mut self, amount: i32) -> (i32, i32) {
        let before = self.health;
        self.health = self.health.saturating_sub(amount).max(0);
        (before, self.health)
    }

    /// Adds `amount`, never exceeding max health. Returns `(before, after)`.
    pub fn heal(&mut self, amount: i32) -> (i32, i32) {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        (before, self.health)
    }

    // ===== stats =====

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    /// Current value of a stat, including the equipped item's transforms.
    pub fn stat(&self, kind: StatKind) -> i32 {
        let value = i64::from(self.stats.get(kind).value());
        let value = match self.item.current() {
            Some(item) => item.transform_stat(kind, value),
            None => value,
        };
        value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    pub fn attack(&self) -> i32 {
        self.stat(StatKind::Attack)
    }

    pub fn defence(&self) -> i32 {
        self.stat(StatKind::Defence)
    }

    pub fn speed(&self) -> i32 {
        self.stat(StatKind::Speed)
    }

    pub fn change_multiplier(&mut self, kind: StatKind, delta: f64) -> (f64, f64) {
        self.stats.get_mut(kind).change_multiplier(delta)
    }

    /// Runs a base power through the equipped item's power chain.
    pub fn transform_power(&self, power: i64) -> i64 {
        match self.item.current() {
            Some(item) => item.transform_power(power),
            None => power,
        }
    }

    // ===== equipment =====

    pub fn item(&self) -> Option<&Arc<Item>> {
        self.item.current()
    }

    pub fn equip(&mut self, item: Arc<Item>) {
        self.item.equip(item);
    }

    /// Removes the current item and restores the one held before it.
    pub fn unequip(&mut self) -> Option<Arc<Item>> {
        self.item.remove()
    }

    // ===== protect queue =====

    /// True iff a protector is queued and the effect comes from someone else.
    ///
    /// Self-targeted effects always land.
    pub fn can_protect_from(&self, user: CharacterId) -> bool {
        !self.protect_queue.is_empty() && user != self.id
    }

    /// Pops the oldest protector.
    pub fn consume_protect(&mut self) -> Result<CharacterId, CharacterError> {
        self.protect_queue
            .pop_front()
            .ok_or(CharacterError::NoProtectQueued { id: self.id })
    }

    /// Consumes a protector if an effect from `user` can be blocked.
    pub fn protect_against(&mut self, user: CharacterId) -> Option<CharacterId> {
        if !self.can_protect_from(user) {
            return None;
        }
        let protector = self.consume_protect().ok()?;
        tracing::debug!(
            "{} ({}) blocked an effect from {} thanks to {}",
            self.name,
            self.id,
            user,
            protector
        );
        Some(protector)
    }

    /// Queues `protector`. Returns false once the queue has reached the limit.
    pub fn add_protect(&mut self, protector: CharacterId) -> bool {
        if self.protect_queue.len() as i64 >= i64::from(self.protect_limit) {
            return false;
        }
        self.protect_queue.push_back(protector);
        true
    }

    pub fn protect_count(&self) -> usize {
        self.protect_queue.len()
    }

    pub fn protectors(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.protect_queue.iter().copied()
    }

    pub fn protect_limit(&self) -> i32 {
        self.protect_limit
    }

    /// Adds `delta` to the protect limit. Returns `(before, after)`.
    pub fn change_protect_limit(&mut self, delta: i32) -> (i32, i32) {
        let before = self.protect_limit;
        self.protect_limit = self.protect_limit.saturating_add(delta);
        (before, self.protect_limit)
    }

    pub fn clear_protects(&mut self) {
        self.protect_queue.clear();
    }

    // ===== flinch =====

    pub fn will_flinch(&self) -> bool {
        self.will_flinch
    }

    pub fn set_flinch(&mut self) {
        self.will_flinch = true;
    }

    /// Reads and clears the flinch flag.
    pub fn take_flinch(&mut self) -> bool {
        std::mem::take(&mut self.will_flinch)
    }
}
