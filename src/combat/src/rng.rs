//! Random source shared by every combat rule.
//!
//! All draws (attack rolls, recoil, potion heals, archetype sampling and
//! retaliation picks) go through [`CombatRng`], so a battle can be replayed
//! from a seed or driven by a fixed script in tests.

use std::collections::VecDeque;

use rand::{
    Rng, SeedableRng,
    distr::{Distribution, weighted::WeightedIndex},
    seq::index,
};
use rand_pcg::Pcg32;

/// 战斗用随机数来源
pub trait CombatRng {
    /// Uniform integer in `[min, max]`, both bounds inclusive.
    fn roll(&mut self, min: i32, max: i32) -> i32;

    /// Index into `weights`, chosen with probability proportional to its weight.
    fn pick_weighted(&mut self, weights: &[u32]) -> usize;

    /// `amount` distinct indices from `0..len`, in the order they were drawn.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize>;
}

/// 确定性RNG，基于PCG32
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: Pcg32,
    seed: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// 获取当前种子值
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl CombatRng for SeededRng {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn pick_weighted(&mut self, weights: &[u32]) -> usize {
        // All-zero or empty weights fall back to the first entry.
        match WeightedIndex::new(weights) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(_) => 0,
        }
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}

/// Replays queued draws in order.
///
/// `roll` pops from the roll queue and clamps the value into the requested
/// range; an exhausted queue yields `min`. `pick_weighted` pops from the pick
/// queue (default `0`). `sample_indices` returns the first `amount` indices in
/// ascending order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    rolls: VecDeque<i32>,
    picks: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            picks: VecDeque::new(),
        }
    }

    pub fn push_rolls(&mut self, rolls: impl IntoIterator<Item = i32>) -> &mut Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn push_picks(&mut self, picks: impl IntoIterator<Item = usize>) -> &mut Self {
        self.picks.extend(picks);
        self
    }

    /// Draws still queued.
    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl CombatRng for ScriptedRng {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        self.rolls.pop_front().map_or(min, |v| v.clamp(min, max.max(min)))
    }

    fn pick_weighted(&mut self, weights: &[u32]) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(weights.len().saturating_sub(1))
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (0..amount.min(len)).collect()
    }
}
