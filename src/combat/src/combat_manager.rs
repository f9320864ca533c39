//! Turn orchestrator: player action, enemy retaliation, win/loss check.

use strum::Display;
use tracing::{debug, info};

use crate::combatant::Combatant;
use crate::rng::CombatRng;
use crate::{AttackKind, AttackOutcome, Combat, constants};

/// Phases a battle moves through during one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattlePhase {
    AwaitingPlayerAction,
    ResolvingPlayerAction,
    EnemyRetaliation,
    CheckWinLoss,
    Terminal(Outcome),
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Outcome {
    Win,
    Lose,
    Quit,
}

impl Outcome {
    /// Message shown to the player when the battle ends.
    pub fn reason(self) -> &'static str {
        match self {
            Outcome::Win => "You defeated every enemy, well done!",
            Outcome::Lose => "You have been defeated. The empire crumbles.",
            Outcome::Quit => "End of game.",
        }
    }
}

/// 玩家在一个回合内可以执行的动作
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    /// Attack the live enemy at `target` (0-based).
    Attack { target: usize, kind: AttackKind },
    TakePotion,
    Quit,
}

/// One enemy hit during retaliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strike {
    pub attacker: String,
    pub damage: i32,
}

/// Everything that happened during one call to [`Battle::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub action: PlayerAction,
    pub attack: Option<AttackOutcome>,
    /// Name of the enemy removed from the batch this turn.
    pub defeated: Option<String>,
    pub potion_heal: Option<i32>,
    pub retaliation: Vec<Strike>,
    pub phases: Vec<BattlePhase>,
    pub outcome: Option<Outcome>,
}

impl TurnReport {
    fn new(action: PlayerAction) -> Self {
        Self {
            action,
            attack: None,
            defeated: None,
            potion_heal: None,
            retaliation: Vec::new(),
            phases: Vec::new(),
            outcome: None,
        }
    }

    pub fn retaliation_total(&self) -> i32 {
        self.retaliation.iter().map(|s| s.damage).sum()
    }

    pub fn visited(&self, phase: BattlePhase) -> bool {
        self.phases.contains(&phase)
    }
}

/// A running battle between the player and a batch of live enemies.
///
/// Dead enemies are removed from the batch as soon as they fall, so target
/// indices always refer to live enemies.
#[derive(Clone, Debug)]
pub struct Battle {
    player: Combatant,
    enemies: Vec<Combatant>,
    phase: BattlePhase,
}

impl Battle {
    pub fn new(player: Combatant, enemies: Vec<Combatant>) -> Self {
        info!(player = %player.name, enemies = enemies.len(), "battle started");
        Self {
            player,
            enemies,
            phase: BattlePhase::AwaitingPlayerAction,
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            BattlePhase::Terminal(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    fn enter(&mut self, phase: BattlePhase, report: &mut TurnReport) {
        debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
        report.phases.push(phase);
        if let BattlePhase::Terminal(outcome) = phase {
            report.outcome = Some(outcome);
            info!(%outcome, health = self.player.health, "battle over");
        }
    }

    /// Plays one full turn for `action`.
    ///
    /// # Panics
    ///
    /// Panics if an attack targets an index outside the live batch.
    pub fn step<R: CombatRng + ?Sized>(&mut self, action: PlayerAction, rng: &mut R) -> TurnReport {
        let mut report = TurnReport::new(action);

        if let BattlePhase::Terminal(outcome) = self.phase {
            report.outcome = Some(outcome);
            return report;
        }

        match action {
            PlayerAction::Quit => {
                self.enter(BattlePhase::Terminal(Outcome::Quit), &mut report);
                return report;
            }
            PlayerAction::Attack { target, kind } => {
                self.enter(BattlePhase::ResolvingPlayerAction, &mut report);
                assert!(
                    target < self.enemies.len(),
                    "attack target {target} out of range ({} live enemies)",
                    self.enemies.len()
                );
                let outcome =
                    Combat::resolve_attack(&mut self.player, &mut self.enemies[target], kind, rng);
                if outcome.defender_died {
                    let fallen = self.enemies.remove(target);
                    report.defeated = Some(fallen.name);
                }
                report.attack = Some(outcome);
            }
            PlayerAction::TakePotion => {
                self.enter(BattlePhase::ResolvingPlayerAction, &mut report);
                report.potion_heal = Some(self.player.consume_potion(rng));
            }
        }

        self.enter(BattlePhase::CheckWinLoss, &mut report);
        if self.enemies.is_empty() {
            self.enter(BattlePhase::Terminal(Outcome::Win), &mut report);
            return report;
        }

        self.enter(BattlePhase::EnemyRetaliation, &mut report);
        report.retaliation = self.retaliate(rng);

        self.enter(BattlePhase::CheckWinLoss, &mut report);
        if self.player.is_dead() {
            self.enter(BattlePhase::Terminal(Outcome::Lose), &mut report);
        } else {
            self.enter(BattlePhase::AwaitingPlayerAction, &mut report);
        }
        report
    }

    /// Up to three distinct live enemies, picked at random, each strike the
    /// player once.
    fn retaliate<R: CombatRng + ?Sized>(&mut self, rng: &mut R) -> Vec<Strike> {
        let amount = self.enemies.len().min(constants::MAX_RETALIATORS);
        rng.sample_indices(self.enemies.len(), amount)
            .into_iter()
            .map(|idx| {
                let enemy = &self.enemies[idx];
                Strike {
                    attacker: enemy.name.clone(),
                    damage: Combat::strike(enemy, &mut self.player, rng),
                }
            })
            .collect()
    }
}
