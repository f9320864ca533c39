//! Plain-text rendering of the battle for the console.

use combat::{AttackKind, Combatant, PlayerAction, Role, TurnReport};
use crossterm::style::Stylize;

/// Health points represented by one cell of the health bar.
pub const HEALTH_PER_CELL: i32 = 5;

/// Health bar: one cell per started block of [`HEALTH_PER_CELL`] points,
/// empty once the combatant is down.
pub fn health_bar(combatant: &Combatant) -> String {
    let cells = if combatant.health > 0 {
        (combatant.health + HEALTH_PER_CELL - 1) / HEALTH_PER_CELL
    } else {
        0
    };
    let bar = "█".repeat(cells as usize);
    match combatant.role {
        Role::Player => bar.red().to_string(),
        Role::Enemy => bar.green().to_string(),
    }
}

/// `<icon> <name> => <bar> <health> <potions>`
pub fn combatant_line(combatant: &Combatant) -> String {
    let mut line = format!(
        "{} {:10} => {} {}",
        combatant.archetype.icon(),
        combatant.name,
        health_bar(combatant),
        combatant.health
    );
    if combatant.potions > 0 {
        line.push(' ');
        line.push_str(&"🧪".repeat(combatant.potions as usize));
    }
    line
}

pub fn start_fight(enemies: &[Combatant]) -> Vec<String> {
    let mut lines = vec!["You stumble upon a horde of enemies made of...".to_string()];
    lines.extend(enemies.iter().map(combatant_line));
    lines.push("⚔️  The fight is on ⚔️".to_string());
    lines
}

pub fn enemy_choices(enemies: &[Combatant]) -> Vec<String> {
    let mut lines = vec!["Which enemy do you want to attack?".to_string()];
    lines.extend(
        enemies
            .iter()
            .enumerate()
            .map(|(i, enemy)| format!("{} : {}", i + 1, combatant_line(enemy))),
    );
    lines
}

/// Living combatants, player first.
pub fn show_health(player: &Combatant, enemies: &[Combatant]) -> Vec<String> {
    std::iter::once(player)
        .chain(enemies.iter())
        .filter(|c| c.is_alive())
        .map(combatant_line)
        .collect()
}

/// Message lines describing a resolved turn, excluding the final reason.
pub fn turn_lines(report: &TurnReport, player: &Combatant) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(attack) = &report.attack {
        if matches!(report.action, PlayerAction::Attack { kind: AttackKind::Super, .. }) {
            lines.push("✨ Super attack!".to_string());
        }
        lines.extend(attack.logs.iter().cloned());
    }

    match report.potion_heal {
        Some(0) => lines.push(format!("{} has no potion left.", player.name)),
        Some(heal) => lines.push(format!(
            "🧪 {} drinks a potion and gains {} health.",
            player.name, heal
        )),
        None => {}
    }

    for strike in &report.retaliation {
        lines.push(format!(
            "💥 {} attacks {} and deals {} damage.",
            strike.attacker, player.name, strike.damage
        ));
    }
    if report.retaliation.len() > 1 {
        lines.push(format!("Total damage taken: {}", report.retaliation_total()));
    }
    lines
}
