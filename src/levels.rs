//! Static level table
//!
//! Levels are pure configuration. The live loop reads the active level's
//! spawn rate and clot speed; target scores, pulse cooldowns and boss flags
//! are carried for hosts that build progression on top.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::BASE_SPAWN_INTERVAL_MS;

/// Cooldown between clot "pulses" (synchronized surges)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cooldown {
    Fixed(f32),
    Range { min: f32, max: f32 },
}

impl Cooldown {
    /// Midpoint of the cooldown window
    pub fn nominal_ms(&self) -> f32 {
        match *self {
            Cooldown::Fixed(ms) => ms,
            Cooldown::Range { min, max } => (min + max) * 0.5,
        }
    }
}

/// One named entry in the level table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub name: String,
    /// Base spawn interval before the difficulty multiplier
    pub spawn_rate_ms: f32,
    pub clot_speed_multiplier: f32,
    pub pulse_cooldown: Cooldown,
    pub target_score: u64,
    #[serde(default)]
    pub boss: bool,
}

impl LevelConfig {
    fn new(
        name: &str,
        spawn_rate_ms: f32,
        clot_speed_multiplier: f32,
        pulse_cooldown: Cooldown,
        target_score: u64,
        boss: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            spawn_rate_ms,
            clot_speed_multiplier,
            pulse_cooldown,
            target_score,
            boss,
        }
    }

    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if !(self.spawn_rate_ms > 0.0) {
            return Err(ConfigError::InvalidLevel {
                index,
                reason: "spawn_rate_ms must be positive",
            });
        }
        if !(self.clot_speed_multiplier > 0.0) {
            return Err(ConfigError::InvalidLevel {
                index,
                reason: "clot_speed_multiplier must be positive",
            });
        }
        if let Cooldown::Range { min, max } = self.pulse_cooldown {
            if min > max {
                return Err(ConfigError::InvalidLevel {
                    index,
                    reason: "pulse_cooldown range is inverted",
                });
            }
        }
        Ok(())
    }
}

/// Built-in level table. The first entry matches the endless ramp exactly.
pub fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig::new(
            "Capillary",
            BASE_SPAWN_INTERVAL_MS,
            1.0,
            Cooldown::Fixed(4000.0),
            2_000,
            false,
        ),
        LevelConfig::new(
            "Venule",
            2200.0,
            1.15,
            Cooldown::Range {
                min: 3000.0,
                max: 4000.0,
            },
            5_000,
            false,
        ),
        LevelConfig::new(
            "Artery",
            1900.0,
            1.3,
            Cooldown::Range {
                min: 2500.0,
                max: 3500.0,
            },
            10_000,
            false,
        ),
        LevelConfig::new(
            "Aorta",
            1600.0,
            1.5,
            Cooldown::Range {
                min: 2000.0,
                max: 3000.0,
            },
            20_000,
            true,
        ),
    ]
}

/// Look up a level, treating a missing entry as a configuration error
pub fn level_at(levels: &[LevelConfig], index: usize) -> Result<&LevelConfig, ConfigError> {
    levels.get(index).ok_or(ConfigError::MissingLevel {
        index,
        available: levels.len(),
    })
}
