//! Player-side setup: the sorcerer hero and the battle it walks into.

pub mod class;

pub use crate::class::Difficulty;

use combat::{Archetype, Battle, Combatant, CombatRng, EnemyCatalog};
use error::GameError;
use tracing::info;

/// 英雄构建器
pub struct Hero;

impl Hero {
    /// Creates the sorcerer with health scaled by `difficulty`.
    pub fn new(name: &str, difficulty: Difficulty) -> Result<Combatant, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        let health = Archetype::Sorcerer.base_health() * difficulty.health_multiplier();
        Ok(Combatant::player(name, health))
    }

    /// Generates `difficulty.enemy_count()` enemies and opens the battle.
    pub fn enter_battle<R: CombatRng + ?Sized>(
        hero: Combatant,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Battle {
        let enemies = EnemyCatalog::generate(difficulty.enemy_count(), rng);
        info!(%difficulty, hero = %hero.name, health = hero.health, "entering battle");
        Battle::new(hero, enemies)
    }
}
