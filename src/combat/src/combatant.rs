// src/combat/src/combatant.rs

use strum::{Display, EnumIter};
use tracing::debug;

use crate::constants;
use crate::rng::CombatRng;

/// 战斗者所属阵营，在构造时确定
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Enemy,
}

/// 战斗者原型：决定基础属性与出现权重
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Archetype {
    Sorcerer,
    Wolf,
    Dragon,
    Lion,
}

impl Archetype {
    /// 基础生命值（法师为难度 1 时的数值）
    pub fn base_health(self) -> i32 {
        match self {
            Archetype::Sorcerer => 50,
            Archetype::Wolf => 25,
            Archetype::Dragon => 50,
            Archetype::Lion => 15,
        }
    }

    /// 攻击力倍率
    pub fn base_strength(self) -> f64 {
        match self {
            Archetype::Sorcerer => 3.0,
            Archetype::Wolf => 1.5,
            Archetype::Dragon => 1.0,
            Archetype::Lion => 4.0,
        }
    }

    /// Relative likelihood of being sampled by the enemy catalog. The
    /// player archetype is never sampled.
    pub fn spawn_weight(self) -> u32 {
        match self {
            Archetype::Sorcerer => 0,
            Archetype::Wolf => 20,
            Archetype::Dragon => 10,
            Archetype::Lion => 2,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Archetype::Sorcerer => "🧙",
            Archetype::Wolf => "🐺",
            Archetype::Dragon => "🐉",
            Archetype::Lion => "🦁",
        }
    }
}

/// A fighter on either side of the battle.
///
/// Health is signed: attacks may push it below zero and nothing clamps it.
/// The combatant is alive exactly while `health > 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    pub name: String,
    pub role: Role,
    pub archetype: Archetype,
    pub health: i32,
    pub strength: f64,
    pub potions: u32,
}

impl Combatant {
    /// Builds a player-side combatant with the sorcerer's strength and the
    /// standard potion bag.
    pub fn player(name: impl Into<String>, health: i32) -> Self {
        let archetype = Archetype::Sorcerer;
        Self {
            name: name.into(),
            role: Role::Player,
            archetype,
            health,
            strength: archetype.base_strength(),
            potions: constants::PLAYER_POTIONS,
        }
    }

    /// Builds an enemy with its archetype's base stats and a starting potion
    /// count drawn uniformly from `0..=2`.
    pub fn enemy<R: CombatRng + ?Sized>(archetype: Archetype, rng: &mut R) -> Self {
        let (min, max) = constants::ENEMY_POTIONS;
        let potions = rng.roll(min, max).max(0) as u32;
        Self::enemy_with_potions(archetype, potions)
    }

    pub fn enemy_with_potions(archetype: Archetype, potions: u32) -> Self {
        Self {
            name: archetype.to_string(),
            role: Role::Enemy,
            archetype,
            health: archetype.base_health(),
            strength: archetype.base_strength(),
            potions,
        }
    }

    /// 是否存活
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    pub fn is_enemy(&self) -> bool {
        self.role == Role::Enemy
    }

    /// 喝下一瓶药水，返回恢复的生命值
    ///
    /// With an empty bag nothing changes and `0` is returned.
    pub fn consume_potion<R: CombatRng + ?Sized>(&mut self, rng: &mut R) -> i32 {
        if self.potions == 0 {
            debug!(name = %self.name, "no potion left");
            return 0;
        }

        let (min, max) = constants::POTION_HEAL;
        let heal = rng.roll(min, max);
        self.health += heal;
        self.potions -= 1;
        debug!(name = %self.name, heal, health = self.health, potions = self.potions, "potion consumed");
        heal
    }
}
