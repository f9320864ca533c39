//! Console prompts. Every prompt re-asks until it gets a usable answer, so
//! the combat core only ever sees validated choices.

use std::io::{BufRead, Write};

use error::{GameError, handle_error};
use hero::Difficulty;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Entries of the action menu, numbered by position starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
pub enum MenuChoice {
    #[strum(to_string = "Default attack")]
    Attack,
    #[strum(to_string = "Super attack")]
    SuperAttack,
    #[strum(to_string = "Take a potion")]
    TakePotion,
    #[strum(to_string = "Quit")]
    Quit,
}

impl MenuChoice {
    pub fn entries() -> Vec<(usize, MenuChoice)> {
        MenuChoice::iter().enumerate().map(|(i, c)| (i + 1, c)).collect()
    }
}

/// Parses a 1-based choice, accepting `1..=max`.
pub fn parse_choice(input: &str, max: usize) -> Result<usize, GameError> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(GameError::InvalidChoice {
            input: trimmed.to_string(),
            max,
        }),
    }
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), GameError> {
        writeln!(self.writer, "{}", line.as_ref())?;
        Ok(())
    }

    /// Prints `prompt` and reads one line. End of input is `InputClosed`.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, GameError> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Repeats `prompt` until `parse` succeeds or fails with a
    /// non-retryable error.
    fn ask<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => self.say(handle_error(&e))?,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn choose_difficulty(&mut self) -> Result<Difficulty, GameError> {
        self.ask("Choose a difficulty level (1, 2 or 3): ", |line| line.parse())
    }

    pub fn ask_name(&mut self) -> Result<String, GameError> {
        self.ask("Enter your character's name: ", |line| {
            let name = line.trim();
            if name.is_empty() {
                Err(GameError::EmptyName)
            } else {
                Ok(name.to_string())
            }
        })
    }

    pub fn choose_action(&mut self) -> Result<MenuChoice, GameError> {
        let entries = MenuChoice::entries();
        for (option, choice) in &entries {
            self.say(format!("{}: {}", option, choice))?;
        }
        let option = self.ask("👉 Make your choice: ", |line| parse_choice(line, entries.len()))?;
        Ok(entries[option - 1].1)
    }

    /// Asks for an enemy number in `1..=count` and returns its 0-based index.
    /// The list itself is printed by the caller.
    pub fn choose_target(&mut self, count: usize) -> Result<usize, GameError> {
        if count == 1 {
            return Ok(0);
        }
        let option = self.ask("Enemy to attack: ", |line| parse_choice(line, count))?;
        Ok(option - 1)
    }
}
