//! Time-driven difficulty ramp
//!
//! Every [`DIFFICULTY_STEP_MS`] of play raises the level by one. The
//! multiplier scales spawn frequency and clot speed and is capped at
//! [`DIFFICULTY_MAX_MULTIPLIER`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub elapsed_ms: f32,
    pub level: u32,
}

impl Difficulty {
    /// Advance the clock. Returns the new level if it just went up.
    pub fn tick(&mut self, dt_ms: f32) -> Option<u32> {
        self.elapsed_ms += dt_ms;
        let level = level_for(self.elapsed_ms);
        if level > self.level {
            self.level = level;
            Some(level)
        } else {
            None
        }
    }

    pub fn multiplier(&self) -> f32 {
        multiplier_for(self.level)
    }

    /// Time between spawn ticks for a given base interval
    pub fn spawn_interval_ms(&self, base_interval_ms: f32) -> f32 {
        base_interval_ms / self.multiplier()
    }

    /// How many clots a spawn tick produces. Each extra is an independent roll.
    pub fn spawn_count<R: Rng>(&self, rng: &mut R) -> usize {
        let mut count = 1;
        if self.level >= EXTRA_SPAWN_LEVEL && rng.random_bool(EXTRA_SPAWN_CHANCE) {
            count += 1;
        }
        if self.level >= SECOND_EXTRA_SPAWN_LEVEL && rng.random_bool(SECOND_EXTRA_SPAWN_CHANCE) {
            count += 1;
        }
        count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Discrete level for an amount of play time
pub fn level_for(elapsed_ms: f32) -> u32 {
    (elapsed_ms.max(0.0) / DIFFICULTY_STEP_MS).floor() as u32
}

pub fn multiplier_for(level: u32) -> f32 {
    (1.0 + level as f32 * DIFFICULTY_PER_LEVEL).min(DIFFICULTY_MAX_MULTIPLIER)
}
