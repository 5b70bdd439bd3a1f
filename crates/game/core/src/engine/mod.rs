//! Round loop: item phases, move selection and move resolution.
//!
//! [`TurnBasedBattle`] owns every piece of mutable battle state and the
//! injected collaborators. One call to [`TurnBasedBattle::run_round`] plays
//! a full round:
//!
//! ```text
//! advance turn
//!   → start-of-turn item actions
//!   → each living character picks a move (fastest first)
//!   → queued moves resolve by priority, then speed
//!   → end-of-turn item actions, protect queues cleared
//!   → victory / draw check
//! ```

mod errors;
mod processor;

pub use errors::BattleError;
pub use processor::MoveProcessor;

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::action::{ActionResult, ActionSource, ActionTags, ResolveContext};
use crate::config::BattleConfig;
use crate::env::{
    BattleOutput, MoveChooser, NoInput, NullOutput, RandomMoveChooser, RandomSource, TargetInput,
};
use crate::error::{ConfigError, GameError};
use crate::history::ActionHistory;
use crate::moves::{MoveSet, MoveUse};
use crate::state::{CharacterId, Roster, TeamId};

/// How a battle ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory { team: TeamId, rounds: u32 },
    /// No team left standing, or the round cap was hit.
    Draw { rounds: u32 },
}

impl BattleOutcome {
    pub fn rounds(&self) -> u32 {
        match self {
            BattleOutcome::Victory { rounds, .. } | BattleOutcome::Draw { rounds } => *rounds,
        }
    }

    pub fn winner(&self) -> Option<TeamId> {
        match self {
            BattleOutcome::Victory { team, .. } => Some(*team),
            BattleOutcome::Draw { .. } => None,
        }
    }
}

/// Item-action phases that bracket move resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattlePhase {
    StartOfTurn,
    EndOfTurn,
}

impl BattlePhase {
    /// Tag an item action must carry to run in this phase.
    pub fn tag(self) -> ActionTags {
        match self {
            BattlePhase::StartOfTurn => ActionTags::START_OF_TURN,
            BattlePhase::EndOfTurn => ActionTags::END_OF_TURN,
        }
    }
}

/// A battle between two or more teams.
pub struct TurnBasedBattle {
    roster: Roster,
    move_sets: BTreeMap<CharacterId, MoveSet>,
    history: ActionHistory,
    processor: MoveProcessor,
    config: BattleConfig,
    rng: Box<dyn RandomSource>,
    chooser: Box<dyn MoveChooser>,
    input: Box<dyn TargetInput>,
    output: Box<dyn BattleOutput>,
    outcome: Option<BattleOutcome>,
}

impl TurnBasedBattle {
    /// Validates the setup: a sound config, a move set for every character
    /// and at least two teams.
    pub fn new(
        roster: Roster,
        move_sets: BTreeMap<CharacterId, MoveSet>,
        rng: Box<dyn RandomSource>,
        config: BattleConfig,
    ) -> Result<Self, BattleError> {
        config.validate()?;
        if let Some(id) = roster.ids().into_iter().find(|id| !move_sets.contains_key(id)) {
            return Err(ConfigError::MissingMoveSet { id }.into());
        }
        let teams = roster.teams().len();
        if teams < 2 {
            return Err(ConfigError::NotEnoughTeams { teams }.into());
        }

        Ok(Self {
            roster,
            move_sets,
            history: ActionHistory::new(),
            processor: MoveProcessor::new(),
            config,
            rng,
            chooser: Box::new(RandomMoveChooser),
            input: Box::new(NoInput),
            output: Box::new(NullOutput),
            outcome: None,
        })
    }

    pub fn with_chooser(mut self, chooser: Box<dyn MoveChooser>) -> Self {
        self.chooser = chooser;
        self
    }

    pub fn with_input(mut self, input: Box<dyn TargetInput>) -> Self {
        self.input = input;
        self
    }

    pub fn with_output(mut self, output: Box<dyn BattleOutput>) -> Self {
        self.output = output;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable roster access, e.g. to equip items before the first round.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn move_set(&self, id: CharacterId) -> Option<&MoveSet> {
        self.move_sets.get(&id)
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn turn(&self) -> u32 {
        self.history.turn()
    }

    pub fn outcome(&self) -> Option<&BattleOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Plays rounds until the battle ends.
    pub fn run(&mut self) -> BattleOutcome {
        loop {
            if let Some(outcome) = self.run_round() {
                return outcome;
            }
        }
    }

    /// Plays one round. Returns the outcome once the battle is over; calling
    /// again afterwards just returns it.
    pub fn run_round(&mut self) -> Option<BattleOutcome> {
        if let Some(outcome) = &self.outcome {
            return Some(outcome.clone());
        }

        let turn = self.history.advance_turn();
        info!("round {} begins", turn);
        self.output.round_started(turn, &self.roster);

        self.run_phase(BattlePhase::StartOfTurn);
        if let Some(outcome) = self.check_over() {
            return Some(self.finish(outcome));
        }

        self.select_moves();
        self.resolve_moves();
        if let Some(outcome) = self.check_over() {
            return Some(self.finish(outcome));
        }

        self.run_phase(BattlePhase::EndOfTurn);
        for character in self.roster.iter_mut() {
            character.clear_protects();
        }
        if let Some(outcome) = self.check_over() {
            return Some(self.finish(outcome));
        }

        if self.config.max_rounds.is_some_and(|max| turn >= max) {
            info!("round cap of {} reached", turn);
            return Some(self.finish(BattleOutcome::Draw { rounds: turn }));
        }
        None
    }

    // ========================================================================
    // Round steps
    // ========================================================================

    /// Runs the item actions tagged for `phase`, fastest holder first.
    fn run_phase(&mut self, phase: BattlePhase) {
        let tag = phase.tag();
        let mut results: Vec<ActionResult> = Vec::new();

        for id in self.roster.living_by_speed() {
            // an earlier item may have knocked this holder out
            if !self.roster.is_alive(id) {
                continue;
            }
            let Some(item) = self.roster.get(id).and_then(|c| c.item()).cloned() else {
                continue;
            };
            let source = ActionSource::Item(item.name.clone());

            for action in item.actions_tagged(tag) {
                let others = self.roster.others(id);
                let mut ctx = ResolveContext::new(
                    &mut self.roster,
                    &self.history,
                    self.rng.as_mut(),
                    self.input.as_mut(),
                    &self.config,
                );
                let mut slot = action.set_targets(id, &others, &mut ctx);
                let used = action.apply(&mut slot, id, &others, &source, None, &mut ctx);
                debug!("{} {} ({}): {} results", phase, item.name, id, used.results.len());
                results.extend(used.results);
            }
        }

        self.output.phase_resolved(phase, &results, &self.roster);
        self.history.record_action_results(results);
    }

    /// Every living character picks a move, fastest first.
    fn select_moves(&mut self) {
        for id in self.roster.living_by_speed() {
            let (Some(user), Some(moves)) = (self.roster.get(id), self.move_sets.get(&id)) else {
                continue;
            };
            let Some(index) = self.chooser.choose_move(user, moves, self.rng.as_mut()) else {
                debug!("{} passes", id);
                continue;
            };
            let mv = match moves.get(index) {
                Ok(mv) => mv,
                Err(err) => {
                    warn!("{} picked an invalid move [{}]: {}", id, err.error_code(), err);
                    continue;
                }
            };
            if !mv.is_usable() {
                warn!("{} picked {} but it has no uses left", id, mv.name());
                continue;
            }

            let others = self.roster.others(id);
            let mut ctx = ResolveContext::new(
                &mut self.roster,
                &self.history,
                self.rng.as_mut(),
                self.input.as_mut(),
                &self.config,
            );
            let move_use = MoveUse::prepare(id, index, mv, others, &mut ctx);
            if !self.processor.push(move_use, mv) {
                warn!("{} could not queue {}", id, mv.name());
            }
        }
    }

    /// Drains the processor, recording every resolved use.
    fn resolve_moves(&mut self) {
        while !self.processor.is_empty() {
            let mut ctx = ResolveContext::new(
                &mut self.roster,
                &self.history,
                self.rng.as_mut(),
                self.input.as_mut(),
                &self.config,
            );
            let Some(move_use) = self.processor.apply_next(&mut self.move_sets, &mut ctx) else {
                break;
            };
            if move_use.is_resolved() {
                self.output.move_resolved(&move_use, &self.roster);
            }
            self.history.record_move_use(move_use);
        }
    }

    fn check_over(&self) -> Option<BattleOutcome> {
        let alive = self.roster.teams_alive();
        let rounds = self.history.turn();
        match alive.len() {
            0 => Some(BattleOutcome::Draw { rounds }),
            1 => alive
                .into_iter()
                .next()
                .map(|team| BattleOutcome::Victory { team, rounds }),
            _ => None,
        }
    }

    fn finish(&mut self, outcome: BattleOutcome) -> BattleOutcome {
        match &outcome {
            BattleOutcome::Victory { team, rounds } => {
                info!("{} wins after {} rounds", team, rounds)
            }
            BattleOutcome::Draw { rounds } => info!("draw after {} rounds", rounds),
        }
        self.processor.clear();
        self.output.battle_ended(&outcome, &self.roster);
        self.outcome = Some(outcome.clone());
        outcome
    }
}
