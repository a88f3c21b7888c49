//! Clot Pulse - A CRS-pressure arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, CRS, scoring)
//! - `config`: Runtime configuration and validation
//! - `levels`: Static level table
//!
//! Rendering, audio and DOM chrome live in the JS host. The host calls
//! [`sim::GameState::advance_frame`] once per animation frame and draws the
//! returned [`sim::Snapshot`].

pub mod config;
pub mod levels;
pub mod sim;

pub use config::{ConfigError, GameConfig, QualityPreset};
pub use levels::{Cooldown, LevelConfig};

/// Game configuration constants
///
/// Times are in milliseconds. Speeds marked "per frame" are applied once per
/// [`sim::GameState::advance_frame`] call regardless of its `dt`.
pub mod consts {
    /// Upper bound on a single frame's elapsed time (spiral of death guard)
    pub const MAX_FRAME_DT_MS: f32 = 32.0;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Player
    pub const PLAYER_RADIUS: f32 = 22.0;
    /// Distance of the player's center above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f32 = 70.0;
    pub const PLAYER_LERP: f32 = 0.12;

    /// Auto-fire intervals
    pub const FIRE_INTERVAL_MS: f32 = 120.0;
    pub const RAPID_FIRE_INTERVAL_MS: f32 = 75.0;
    /// Horizontal spacing of multi-shot projectiles
    pub const MULTI_SHOT_SPREAD: f32 = 14.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Upward speed (px per frame)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const TRAIL_LENGTH: usize = 10;
    pub const TRAIL_FADE_PER_FRAME: f32 = 0.1;

    /// Clots
    pub const CLOT_MIN_BASE_RADIUS: f32 = 28.0;
    pub const CLOT_MAX_BASE_RADIUS: f32 = 45.0;
    pub const CLOT_MIN_RADIUS: f32 = 10.0;
    pub const CLOT_MIN_SHRINK: f32 = 4.0;
    pub const CLOT_MAX_SHRINK: f32 = 7.0;
    /// Downward speed range before difficulty scaling (px per frame)
    pub const CLOT_MIN_SPEED: f32 = 0.6;
    pub const CLOT_MAX_SPEED: f32 = 1.2;
    /// Horizontal drift magnitude bound (px per frame)
    pub const CLOT_MAX_DRIFT: f32 = 1.0;
    pub const CLOT_DROP_CHANCE: f64 = 0.15;
    pub const HIT_FLASH_MS: f32 = 200.0;
    /// Scale fallback divisor for hazards without a base radius
    pub const REFERENCE_RADIUS: f32 = 50.0;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 14.0;
    /// Downward speed (px per frame)
    pub const POWERUP_SPEED: f32 = 1.5;
    pub const POWERUP_PICKUP_MARGIN: f32 = 30.0;
    /// How far below the playfield a power-up survives
    pub const POWERUP_OFFSCREEN_MARGIN: f32 = 50.0;
    pub const RAPID_FIRE_DURATION_MS: f32 = 8000.0;
    pub const MULTI_SHOT_DURATION_MS: f32 = 8000.0;
    pub const SHIELD_DURATION_MS: f32 = 6000.0;
    pub const HEAL_AMOUNT: f32 = 15.0;

    /// CRS model
    pub const CRS_MAX: f32 = 100.0;
    pub const CRS_CRITICAL_FRACTION: f32 = 0.7;
    pub const CRS_RECOVERY_RATE: f32 = 5.0;
    pub const CRS_ACCUMULATION_RATE: f32 = 2.0;
    pub const ESCAPE_PENALTY_BASE: f32 = 25.0;
    pub const ESCAPE_PENALTY_PER_SCALE: f32 = 15.0;

    /// Combo and scoring
    pub const COMBO_WINDOW_MS: f32 = 1500.0;
    pub const COMBO_CAP: u32 = 10;
    pub const HIT_SCORE: u64 = 5;
    pub const DESTROY_SCORE: u64 = 50;

    /// Difficulty ramp
    pub const DIFFICULTY_STEP_MS: f32 = 5000.0;
    pub const DIFFICULTY_PER_LEVEL: f32 = 0.4;
    pub const DIFFICULTY_MAX_MULTIPLIER: f32 = 4.0;
    pub const BASE_SPAWN_INTERVAL_MS: f32 = 2500.0;
    pub const EXTRA_SPAWN_LEVEL: u32 = 3;
    pub const EXTRA_SPAWN_CHANCE: f64 = 0.3;
    pub const SECOND_EXTRA_SPAWN_LEVEL: u32 = 5;
    pub const SECOND_EXTRA_SPAWN_CHANCE: f64 = 0.25;

    /// Particles
    pub const HIT_BURST: usize = 6;
    pub const DESTROY_BURST: usize = 20;
    pub const PICKUP_BURST: usize = 10;
}
