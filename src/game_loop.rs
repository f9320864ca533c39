//! Interactive session: collects choices from the console, feeds them to
//! the battle, and prints what happened.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use combat::{AttackKind, Battle, CombatRng, Outcome, PlayerAction};
use error::GameError;
use hero::{Difficulty, Hero};
use tracing::{debug, info};

use crate::input::{Console, MenuChoice};
use crate::renderer;

/// Answers supplied up front (from the command line) instead of prompts.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub difficulty: Option<Difficulty>,
    pub name: Option<String>,
}

pub struct GameSession<R, W> {
    console: Console<R, W>,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> GameSession<R, W> {
    pub fn new(console: Console<R, W>, options: SessionOptions) -> Self {
        Self { console, options }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Plays one battle to its end. Closing the input counts as quitting.
    pub fn run<G: CombatRng + ?Sized>(&mut self, rng: &mut G) -> Result<Outcome> {
        let outcome = match self.play(rng) {
            Ok(outcome) => outcome,
            Err(GameError::InputClosed) => {
                info!("input closed, quitting");
                Outcome::Quit
            }
            Err(e) => return Err(e).context("game session failed"),
        };
        self.console.say(outcome.reason())?;
        Ok(outcome)
    }

    fn play<G: CombatRng + ?Sized>(&mut self, rng: &mut G) -> Result<Outcome, GameError> {
        let difficulty = match self.options.difficulty {
            Some(difficulty) => difficulty,
            None => self.console.choose_difficulty()?,
        };
        let hero = match self.options.name.as_deref().map(|name| Hero::new(name, difficulty)) {
            Some(Ok(hero)) => hero,
            Some(Err(e)) if !e.is_retryable() => return Err(e),
            _ => {
                let name = self.console.ask_name()?;
                Hero::new(&name, difficulty)?
            }
        };

        let mut battle = Hero::enter_battle(hero, difficulty, rng);
        for line in renderer::start_fight(battle.enemies()) {
            self.console.say(line)?;
        }

        loop {
            let action = self.next_action(&battle)?;
            debug!(?action, "player action");
            let report = battle.step(action, rng);

            for line in renderer::turn_lines(&report, battle.player()) {
                self.console.say(line)?;
            }
            if let Some(outcome) = report.outcome {
                return Ok(outcome);
            }
            for line in renderer::show_health(battle.player(), battle.enemies()) {
                self.console.say(line)?;
            }
        }
    }

    fn next_action(&mut self, battle: &Battle) -> Result<PlayerAction, GameError> {
        let kind = match self.console.choose_action()? {
            MenuChoice::Attack => AttackKind::Default,
            MenuChoice::SuperAttack => AttackKind::Super,
            MenuChoice::TakePotion => return Ok(PlayerAction::TakePotion),
            MenuChoice::Quit => return Ok(PlayerAction::Quit),
        };

        let enemies = battle.enemies();
        if enemies.len() > 1 {
            for line in renderer::enemy_choices(enemies) {
                self.console.say(line)?;
            }
        }
        let target = self.console.choose_target(enemies.len())?;
        Ok(PlayerAction::Attack { target, kind })
    }
}
