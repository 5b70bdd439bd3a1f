//! Console rendering of battle progress.

use battle_core::{
    ActionResult, BattleOutcome, BattleOutput, BattlePhase, CharacterId, EffectDelta, MoveUse,
    ProtectOutcome, Roster,
};

/// Prints every round to stdout. Logging stays on stderr.
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    fn name(roster: &Roster, id: CharacterId) -> String {
        roster
            .get(id)
            .map_or_else(|| id.to_string(), |c| c.name().to_owned())
    }

    fn describe(result: &ActionResult, roster: &Roster) -> String {
        let target = Self::name(roster, result.target);
        if let Some(protector) = result.protection.protector() {
            return format!("{target} was shielded by {}", Self::name(roster, protector));
        }
        match &result.delta {
            Some(EffectDelta::Damage {
                amount,
                health_before,
                health_after,
            }) => format!("{target} took {amount} damage ({health_before} -> {health_after})"),
            Some(EffectDelta::Heal {
                health_before,
                health_after,
                ..
            }) => format!("{target} recovered ({health_before} -> {health_after})"),
            Some(EffectDelta::Buff {
                stat,
                multiplier_before,
                multiplier_after,
                ..
            }) => format!("{target}'s {stat} multiplier {multiplier_before:+.2} -> {multiplier_after:+.2}"),
            Some(EffectDelta::Flinch { landed: true }) => format!("{target} flinched"),
            Some(EffectDelta::Flinch { landed: false }) => format!("{target} kept its nerve"),
            Some(EffectDelta::Protect {
                outcome: ProtectOutcome::Added,
                ..
            }) => format!("{target} is protected by {}", Self::name(roster, result.user)),
            Some(EffectDelta::Protect {
                outcome: ProtectOutcome::LimitReached,
                ..
            }) => format!("{target} cannot be protected any further"),
            Some(EffectDelta::ProtectLimitChange {
                limit_before,
                limit_after,
            }) => format!("{target}'s protect limit {limit_before} -> {limit_after}"),
            None => format!("{target} was unaffected"),
        }
    }
}

impl BattleOutput for ConsoleOutput {
    fn round_started(&mut self, turn: u32, roster: &Roster) {
        println!();
        println!("=== Round {turn} ===");
        for character in roster.iter() {
            let status = if character.is_alive() { "" } else { " (down)" };
            println!(
                "  [{}] {:<12} {:>4}/{:<4}{}",
                character.team(),
                character.name(),
                character.health(),
                character.max_health(),
                status
            );
        }
    }

    fn move_resolved(&mut self, move_use: &MoveUse, roster: &Roster) {
        let Some(result) = &move_use.result else {
            return;
        };
        println!(
            "{} used {}: {}",
            Self::name(roster, move_use.user),
            move_use.move_name,
            result.outcome
        );
        for action in &result.actions {
            if let Some(reason) = action.failure {
                println!("  ...but it failed ({reason})");
            }
            for applied in &action.results {
                println!("  {}", Self::describe(applied, roster));
            }
        }
    }

    fn phase_resolved(&mut self, phase: BattlePhase, results: &[ActionResult], roster: &Roster) {
        for result in results {
            println!("[{phase}] {}", Self::describe(result, roster));
        }
    }

    fn battle_ended(&mut self, outcome: &BattleOutcome, roster: &Roster) {
        println!();
        match outcome {
            BattleOutcome::Victory { team, rounds } => {
                let survivors: Vec<&str> = roster
                    .iter()
                    .filter(|c| c.team() == *team && c.is_alive())
                    .map(|c| c.name())
                    .collect();
                println!("{team} wins after {rounds} rounds ({})", survivors.join(", "));
            }
            BattleOutcome::Draw { rounds } => println!("Draw after {rounds} rounds"),
        }
    }
}
