// src/combat/src/enemy.rs

use tracing::debug;

use crate::combatant::{Archetype, Combatant};
use crate::rng::CombatRng;

/// 可生成的敌人种类
pub struct EnemyCatalog;

impl EnemyCatalog {
    /// Archetypes the catalog samples from, in sampling order.
    pub const ROSTER: [Archetype; 3] = [Archetype::Wolf, Archetype::Dragon, Archetype::Lion];

    pub fn weights() -> [u32; 3] {
        Self::ROSTER.map(Archetype::spawn_weight)
    }

    /// Generates `count` enemies, sorted by ascending health.
    ///
    /// Each archetype is drawn independently by spawn weight, then the
    /// enemy's potion count. Equal health keeps sampling order.
    pub fn generate<R: CombatRng + ?Sized>(count: usize, rng: &mut R) -> Vec<Combatant> {
        let weights = Self::weights();
        let mut enemies: Vec<Combatant> = (0..count)
            .map(|_| {
                let archetype = Self::ROSTER[rng.pick_weighted(&weights)];
                Combatant::enemy(archetype, rng)
            })
            .collect();

        // sort_by_key is stable
        enemies.sort_by_key(|enemy| enemy.health);
        debug!(
            count,
            roster = ?enemies.iter().map(|e| e.archetype).collect::<Vec<_>>(),
            "enemies generated"
        );
        enemies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedRng, SeededRng};
    use pretty_assertions::assert_eq;

    #[test]
    fn generate_exact_count() {
        let mut rng = SeededRng::new(3);
        for n in 0..8 {
            assert_eq!(EnemyCatalog::generate(n, &mut rng).len(), n);
        }
    }

    #[test]
    fn generate_zero_is_empty() {
        let mut rng = ScriptedRng::new();
        assert!(EnemyCatalog::generate(0, &mut rng).is_empty());
    }

    #[test]
    fn generated_batch_is_sorted_by_health() {
        let mut rng = SeededRng::new(2024);
        let enemies = EnemyCatalog::generate(50, &mut rng);
        assert!(enemies.windows(2).all(|w| w[0].health <= w[1].health));
        assert!(enemies
            .iter()
            .all(|e| e.is_enemy() && EnemyCatalog::ROSTER.contains(&e.archetype)));
    }

    #[test]
    fn scripted_mix_sorts_lion_wolf_dragon() {
        let mut rng = ScriptedRng::with_rolls([2, 1, 0, 2]);
        // Dragon, Lion, Wolf, Wolf
        rng.push_picks([1, 2, 0, 0]);
        let enemies = EnemyCatalog::generate(4, &mut rng);
        let kinds: Vec<_> = enemies.iter().map(|e| e.archetype).collect();
        assert_eq!(
            kinds,
            vec![Archetype::Lion, Archetype::Wolf, Archetype::Wolf, Archetype::Dragon]
        );
        // 同血量的狼保持抽样顺序：先 0 瓶后 2 瓶
        let potions: Vec<_> = enemies.iter().map(|e| e.potions).collect();
        assert_eq!(potions, vec![1, 0, 2, 2]);
    }

    #[test]
    fn wolves_outnumber_lions() {
        let mut rng = SeededRng::new(77);
        let enemies = EnemyCatalog::generate(3_200, &mut rng);
        let wolves = enemies.iter().filter(|e| e.archetype == Archetype::Wolf).count();
        let dragons = enemies.iter().filter(|e| e.archetype == Archetype::Dragon).count();
        let lions = enemies.iter().filter(|e| e.archetype == Archetype::Lion).count();
        assert!(wolves > dragons && dragons > lions, "{wolves} {dragons} {lions}");
    }
}
