// src/hero/src/class.rs

use std::str::FromStr;

use error::GameError;
use strum::{Display, EnumIter};

/// 难度等级：决定英雄生命倍率与敌人数量
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Difficulty {
    #[default]
    Easy, // 1
    Normal, // 2
    Hard,   // 3
}

impl Difficulty {
    /// 难度编号（1..=3）
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Multiplier applied to the sorcerer's base health.
    pub fn health_multiplier(self) -> i32 {
        i32::from(self.level())
    }

    /// Two enemies per difficulty level.
    pub fn enemy_count(self) -> usize {
        usize::from(self.level()) * 2
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Normal),
            3 => Ok(Difficulty::Hard),
            other => Err(GameError::InvalidDifficulty(other.to_string())),
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| GameError::InvalidDifficulty(trimmed.to_string()))
            .and_then(Difficulty::try_from)
    }
}
