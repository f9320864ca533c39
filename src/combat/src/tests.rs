#[cfg(test)]
mod combat_tests {
    use crate::combat_manager::{Battle, BattlePhase, Outcome, PlayerAction, Strike};
    use crate::combatant::{Archetype, Combatant};
    use crate::rng::{ScriptedRng, SeededRng};
    use crate::{AttackKind, Combat};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn apprentice(health: i32) -> Combatant {
        let mut player = Combatant::player("Paul", health);
        player.strength = 1.0;
        player
    }

    #[test]
    fn test_rounding_half_to_even() {
        assert_eq!(Combat::scale_damage(5, 1.5), 8); // 7.5
        assert_eq!(Combat::scale_damage(7, 1.5), 10); // 10.5
        assert_eq!(Combat::scale_damage(9, 1.5), 14); // 13.5
        assert_eq!(Combat::scale_damage(10, 3.0), 30);
        assert_eq!(Combat::scale_damage(6, 6.0), 36);
    }

    #[test]
    fn test_five_hits_fell_a_dragon() {
        let mut player = apprentice(50);
        let mut dragon = Combatant::enemy_with_potions(Archetype::Dragon, 0);
        let mut rng = ScriptedRng::with_rolls([10; 5]);

        for hit in 1..=5 {
            let outcome = Combat::resolve_attack(&mut player, &mut dragon, AttackKind::Default, &mut rng);
            assert_eq!(outcome.damage, 10);
            assert_eq!(outcome.defender_died, hit == 5);
        }
        assert_eq!(dragon.health, 0);
        assert!(dragon.is_dead());
        assert_eq!(player.health, 50);
    }

    #[test]
    fn test_loot_transfers_once() {
        let mut player = apprentice(50);
        let mut dragon = Combatant::enemy_with_potions(Archetype::Dragon, 2);
        let mut rng = ScriptedRng::with_rolls([10; 5]);

        let mut looted = Vec::new();
        for _ in 0..5 {
            let outcome = Combat::resolve_attack(&mut player, &mut dragon, AttackKind::Default, &mut rng);
            looted.push(outcome.looted);
        }
        assert_eq!(looted, vec![0, 0, 0, 0, 2]);
        assert_eq!(player.potions, 3 + 2);
        assert_eq!(dragon.potions, 0);
    }

    #[test]
    fn test_super_attack_recoil() {
        let mut player = apprentice(50);
        let mut dragon = Combatant::enemy_with_potions(Archetype::Dragon, 0);
        let mut rng = ScriptedRng::with_rolls([10, 10]);

        let outcome = Combat::resolve_attack(&mut player, &mut dragon, AttackKind::Super, &mut rng);
        assert_eq!(outcome.damage, 20);
        assert_eq!(outcome.recoil, Some(10));
        assert!(!outcome.defender_died);
        assert_eq!(dragon.health, 30);
        assert_eq!(player.health, 40);
        assert_eq!(player.strength, 1.0);
        assert_eq!(outcome.logs.len(), 2);
    }

    #[test]
    fn test_super_attack_kill_loots() {
        let mut player = Combatant::player("Merlin", 100);
        let mut lion = Combatant::enemy_with_potions(Archetype::Lion, 1);
        let mut rng = ScriptedRng::with_rolls([5, 15]);

        let outcome = Combat::resolve_attack(&mut player, &mut lion, AttackKind::Super, &mut rng);
        // 5 * 3.0 * 2
        assert_eq!(outcome.damage, 30);
        assert!(outcome.defender_died);
        assert_eq!(lion.health, -15);
        assert_eq!(player.health, 85);
        assert_eq!(player.potions, 4);
        assert!(outcome.logs.iter().any(|l| l.contains("was defeated")));
    }

    #[test]
    fn test_retaliation_with_two_enemies() {
        let mut player = apprentice(100);
        player.potions = 0;
        let enemies = vec![
            Combatant::enemy_with_potions(Archetype::Wolf, 0),
            Combatant::enemy_with_potions(Archetype::Dragon, 0),
        ];
        let mut battle = Battle::new(player, enemies);
        let mut rng = ScriptedRng::with_rolls([6, 7]);

        let report = battle.step(PlayerAction::TakePotion, &mut rng);
        assert_eq!(report.potion_heal, Some(0));
        assert_eq!(
            report.retaliation,
            vec![
                Strike { attacker: "Wolf".into(), damage: 9 },
                Strike { attacker: "Dragon".into(), damage: 7 },
            ]
        );
        assert_eq!(report.retaliation_total(), 16);
        assert_eq!(battle.player().health, 84);
        assert_eq!(battle.phase(), BattlePhase::AwaitingPlayerAction);
    }

    #[test]
    fn test_at_most_three_retaliate() {
        let player = apprentice(500);
        let enemies = (0..5)
            .map(|_| Combatant::enemy_with_potions(Archetype::Dragon, 0))
            .collect();
        let mut battle = Battle::new(player, enemies);
        let mut rng = SeededRng::new(8);

        let report = battle.step(PlayerAction::TakePotion, &mut rng);
        assert_eq!(report.retaliation.len(), 3);
        let heal = report.potion_heal.unwrap_or_default();
        assert_eq!(battle.player().health, 500 + heal - report.retaliation_total());
    }

    #[test]
    fn test_last_kill_wins_without_retaliation() {
        let player = Combatant::player("Merlin", 50);
        let enemies = vec![Combatant::enemy_with_potions(Archetype::Lion, 2)];
        let mut battle = Battle::new(player, enemies);
        let mut rng = ScriptedRng::with_rolls([5]);

        let report = battle.step(
            PlayerAction::Attack { target: 0, kind: AttackKind::Default },
            &mut rng,
        );
        assert_eq!(report.defeated.as_deref(), Some("Lion"));
        assert_eq!(report.outcome, Some(Outcome::Win));
        assert_eq!(
            report.phases,
            vec![
                BattlePhase::ResolvingPlayerAction,
                BattlePhase::CheckWinLoss,
                BattlePhase::Terminal(Outcome::Win),
            ]
        );
        assert!(!report.visited(BattlePhase::EnemyRetaliation));
        assert!(battle.enemies().is_empty());
        assert_eq!(battle.player().potions, 5);
    }

    #[test]
    fn test_defeated_enemy_is_removed() {
        let player = Combatant::player("Merlin", 100);
        let enemies = vec![
            Combatant::enemy_with_potions(Archetype::Lion, 0),
            Combatant::enemy_with_potions(Archetype::Wolf, 0),
            Combatant::enemy_with_potions(Archetype::Dragon, 0),
        ];
        let mut battle = Battle::new(player, enemies);
        // 9 * 3 = 27 kills the wolf, then lion and dragon strike back
        let mut rng = ScriptedRng::with_rolls([9, 5, 5]);

        let report = battle.step(
            PlayerAction::Attack { target: 1, kind: AttackKind::Default },
            &mut rng,
        );
        assert_eq!(report.defeated.as_deref(), Some("Wolf"));
        let names: Vec<_> = battle.enemies().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Lion", "Dragon"]);
        assert_eq!(report.retaliation_total(), 20 + 5);
        assert_eq!(battle.player().health, 75);
    }

    #[test]
    fn test_player_loses() {
        let mut player = apprentice(5);
        player.potions = 0;
        let enemies = vec![Combatant::enemy_with_potions(Archetype::Lion, 0)];
        let mut battle = Battle::new(player, enemies);
        let mut rng = ScriptedRng::with_rolls([5]);

        let report = battle.step(PlayerAction::TakePotion, &mut rng);
        assert_eq!(report.outcome, Some(Outcome::Lose));
        assert_eq!(battle.player().health, -15);
        assert_eq!(battle.outcome(), Some(Outcome::Lose));
    }

    #[test]
    fn test_every_picked_enemy_strikes_after_death() {
        let mut player = apprentice(5);
        player.potions = 0;
        let enemies = (0..3)
            .map(|_| Combatant::enemy_with_potions(Archetype::Wolf, 0))
            .collect();
        let mut battle = Battle::new(player, enemies);
        // the first wolf already drops the player to -3, the other two still hit
        let mut rng = ScriptedRng::with_rolls([5, 5, 5]);

        let report = battle.step(PlayerAction::TakePotion, &mut rng);
        assert_eq!(report.potion_heal, Some(0));
        assert_eq!(report.retaliation.len(), 3);
        assert!(report.retaliation.iter().all(|s| s.damage == 8));
        assert_eq!(battle.player().health, -19);
        assert_eq!(report.outcome, Some(Outcome::Lose));
    }

    #[test]
    fn test_recoil_death_on_last_kill_still_wins() {
        let player = Combatant::player("Merlin", 5);
        let enemies = vec![Combatant::enemy_with_potions(Archetype::Lion, 0)];
        let mut battle = Battle::new(player, enemies);
        // 5 * 3.0 * 2 = 30 kills the lion, recoil 15 kills the player
        let mut rng = ScriptedRng::with_rolls([5, 15]);

        let report = battle.step(
            PlayerAction::Attack { target: 0, kind: AttackKind::Super },
            &mut rng,
        );
        assert_eq!(battle.player().health, -10);
        assert!(battle.player().is_dead());
        assert_eq!(report.outcome, Some(Outcome::Win));
        assert!(!report.visited(BattlePhase::EnemyRetaliation));
        assert!(report.retaliation.is_empty());
    }

    #[test]
    fn test_quit_is_absorbing() {
        let player = apprentice(50);
        let enemies = vec![Combatant::enemy_with_potions(Archetype::Dragon, 0)];
        let mut battle = Battle::new(player, enemies);
        let mut rng = ScriptedRng::with_rolls([10, 10, 10]);

        let report = battle.step(PlayerAction::Quit, &mut rng);
        assert_eq!(report.phases, vec![BattlePhase::Terminal(Outcome::Quit)]);
        assert!(battle.is_over());

        let before = battle.clone();
        let report = battle.step(
            PlayerAction::Attack { target: 0, kind: AttackKind::Super },
            &mut rng,
        );
        assert_eq!(report.outcome, Some(Outcome::Quit));
        assert!(report.phases.is_empty());
        assert_eq!(battle.player(), before.player());
        assert_eq!(battle.enemies(), before.enemies());
        assert_eq!(rng.remaining_rolls(), 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_target_panics() {
        let player = apprentice(50);
        let enemies = vec![Combatant::enemy_with_potions(Archetype::Dragon, 0)];
        let mut battle = Battle::new(player, enemies);
        let mut rng = ScriptedRng::new();
        battle.step(
            PlayerAction::Attack { target: 1, kind: AttackKind::Default },
            &mut rng,
        );
    }

    #[test]
    fn test_outcome_reasons() {
        assert_eq!(Outcome::Quit.reason(), "End of game.");
        assert!(Outcome::Win.reason().contains("defeated every enemy"));
        assert!(Outcome::Lose.reason().contains("empire crumbles"));
    }

    proptest! {
        #[test]
        fn super_attack_preserves_strength(strength in 0.1f64..10.0, seed in any::<u64>()) {
            let mut player = Combatant::player("Paul", 100);
            player.strength = strength;
            let mut dragon = Combatant::enemy_with_potions(Archetype::Dragon, 1);
            let mut rng = SeededRng::new(seed);
            for _ in 0..10 {
                Combat::resolve_attack(&mut player, &mut dragon, AttackKind::Super, &mut rng);
            }
            prop_assert_eq!(player.strength, strength);
        }

        #[test]
        fn loot_moves_all_potions_on_kill(potions in 0u32..=2, health in 1i32..60, seed in any::<u64>()) {
            let mut player = Combatant::player("Paul", 100);
            let mut enemy = Combatant::enemy_with_potions(Archetype::Wolf, potions);
            enemy.health = health;
            let before = player.potions;
            let mut rng = SeededRng::new(seed);
            let outcome = Combat::resolve_attack(&mut player, &mut enemy, AttackKind::Default, &mut rng);
            prop_assert_eq!(outcome.defender_died, enemy.is_dead());
            if outcome.defender_died {
                prop_assert_eq!(enemy.potions, 0);
                prop_assert_eq!(player.potions, before + potions);
            } else {
                prop_assert_eq!(enemy.potions, potions);
                prop_assert_eq!(player.potions, before);
            }
        }

        #[test]
        fn alive_matches_health_through_a_battle(seed in any::<u64>(), difficulty in 1usize..=3) {
            let mut rng = SeededRng::new(seed);
            let player = Combatant::player("Paul", 50 * difficulty as i32);
            let enemies = crate::EnemyCatalog::generate(difficulty * 2, &mut rng);
            let mut battle = Battle::new(player, enemies);
            for turn in 0..40 {
                if battle.is_over() {
                    break;
                }
                let action = match turn % 3 {
                    0 => PlayerAction::Attack { target: 0, kind: AttackKind::Default },
                    1 => PlayerAction::Attack { target: battle.enemies().len() - 1, kind: AttackKind::Super },
                    _ => PlayerAction::TakePotion,
                };
                battle.step(action, &mut rng);
                prop_assert_eq!(battle.player().is_alive(), battle.player().health > 0);
                prop_assert!(battle.enemies().iter().all(|e| e.is_alive()));
            }
        }
    }
}
