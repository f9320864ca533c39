// src/combat/src/lib.rs

//! Combat rules: combatants, enemy generation, attack resolution and the
//! turn orchestrator that sequences a battle.

use tracing::debug;

pub mod combat_manager;
pub mod combatant;
pub mod enemy;
pub mod rng;

pub use crate::combat_manager::{Battle, BattlePhase, Outcome, PlayerAction, Strike, TurnReport};
pub use crate::combatant::{Archetype, Combatant, Role};
pub use crate::enemy::EnemyCatalog;
pub use crate::rng::{CombatRng, ScriptedRng, SeededRng};

/// Combat configuration constants
pub mod constants {
    pub const ATTACK_ROLL: (i32, i32) = (5, 10); // Base roll before strength
    pub const RECOIL_ROLL: (i32, i32) = (5, 15); // Super attack self-damage
    pub const POTION_HEAL: (i32, i32) = (25, 75);
    pub const ENEMY_POTIONS: (i32, i32) = (0, 2);
    pub const PLAYER_POTIONS: u32 = 3;
    pub const SUPER_ATTACK_MULTIPLIER: f64 = 2.0;
    pub const MAX_RETALIATORS: usize = 3; // Enemies striking back per turn
}

/// Handles combat interactions between combatants
pub struct Combat;

/// 攻击方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    Default,
    /// Double strength for one hit, paid for with recoil damage.
    Super,
}

impl Combat {
    /// Scales a raw roll by strength, rounding half to even.
    pub fn scale_damage(roll: i32, strength: f64) -> i32 {
        (f64::from(roll) * strength).round_ties_even() as i32
    }

    /// A bare default attack: rolls, scales by `strength`, and subtracts the
    /// result from the defender. No death check, no loot.
    fn hit<R: CombatRng + ?Sized>(strength: f64, defender: &mut Combatant, rng: &mut R) -> i32 {
        let (min, max) = constants::ATTACK_ROLL;
        let roll = rng.roll(min, max);
        let damage = Self::scale_damage(roll, strength);
        defender.health -= damage;
        damage
    }

    /// Default attack used for enemy retaliation.
    pub fn strike<R: CombatRng + ?Sized>(
        attacker: &Combatant,
        defender: &mut Combatant,
        rng: &mut R,
    ) -> i32 {
        let damage = Self::hit(attacker.strength, defender, rng);
        debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            damage,
            health = defender.health,
            "strike"
        );
        damage
    }

    /// Resolve a single attack with combat logs.
    ///
    /// A super attack hits with doubled strength, then the attacker takes
    /// recoil damage. The attacker's stored strength is never modified. If
    /// the defender ends up dead the attacker takes all of its potions.
    pub fn resolve_attack<R: CombatRng + ?Sized>(
        attacker: &mut Combatant,
        defender: &mut Combatant,
        kind: AttackKind,
        rng: &mut R,
    ) -> AttackOutcome {
        let mut outcome = AttackOutcome::new(kind);

        let strength = match kind {
            AttackKind::Default => attacker.strength,
            AttackKind::Super => attacker.strength * constants::SUPER_ATTACK_MULTIPLIER,
        };
        outcome.damage = Self::hit(strength, defender, rng);
        outcome.log(format!(
            "💥 {} attacks {} and deals {} damage.",
            attacker.name, defender.name, outcome.damage
        ));

        if kind == AttackKind::Super {
            let (min, max) = constants::RECOIL_ROLL;
            let recoil = rng.roll(min, max);
            attacker.health -= recoil;
            outcome.recoil = Some(recoil);
            outcome.log(format!("🤕 {} loses {} health.", attacker.name, recoil));
        }

        if defender.is_dead() {
            outcome.defender_died = true;
            outcome.looted = defender.potions;
            attacker.potions += defender.potions;
            defender.potions = 0;
            outcome.log(format!("☠️ {} was defeated by {}!", defender.name, attacker.name));
            outcome.log(format!(
                "🧪 {} takes {} potion(s) from {}.",
                attacker.name, outcome.looted, defender.name
            ));
        }

        debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            ?kind,
            damage = outcome.damage,
            recoil = ?outcome.recoil,
            died = outcome.defender_died,
            looted = outcome.looted,
            "attack resolved"
        );
        outcome
    }
}

/// Result of one player attack, with message lines for the console.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub kind: AttackKind,
    pub damage: i32,
    pub recoil: Option<i32>,
    pub defender_died: bool,
    pub looted: u32,
    pub logs: Vec<String>,
}

impl AttackOutcome {
    pub fn new(kind: AttackKind) -> Self {
        Self {
            kind,
            damage: 0,
            recoil: None,
            defender_died: false,
            looted: 0,
            logs: Vec::new(),
        }
    }

    pub fn log(&mut self, message: String) {
        self.logs.push(message);
    }
}

#[cfg(test)]
mod tests;
